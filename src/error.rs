use thiserror::Error;

/// Errors raised at the edges of the crate (configuration and request loading).
///
/// Conflict resolution itself never fails; malformed schedule data is defaulted.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a configuration or request file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input was not valid JSON for the expected shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
