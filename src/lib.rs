pub mod config;
pub mod conflict;
pub mod constants;
pub mod data;
pub mod error;
pub mod logging;
pub mod models;
pub mod time;

pub use config::ResolverConfig;
pub use conflict::{
    detect_and_resolve_conflicts, ConflictKind, ConflictRecord, Resolution, ResolutionContext, Severity,
};
pub use error::{Error, Result};
pub use models::{ScheduleEntry, SectionDescriptor, StationDescriptor};
