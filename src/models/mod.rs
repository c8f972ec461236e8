mod schedule;
mod section;
mod station;

pub use schedule::ScheduleEntry;
pub use section::SectionDescriptor;
pub use station::StationDescriptor;
