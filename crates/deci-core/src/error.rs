//! Error types for the decimal clock

use thiserror::Error;

/// Core decimal clock errors
#[derive(Error, Debug)]
pub enum DeciError {
    // Offset errors
    #[error(
        "UTC offset out of range: {0} (expected {}..={})",
        crate::UtcOffset::MIN_HOURS,
        crate::UtcOffset::MAX_HOURS
    )]
    OffsetOutOfRange(i64),

    #[error("Unknown zone option: {0:?}")]
    UnknownZone(String),

    // Time system errors
    #[error("Invalid time system: {0}")]
    InvalidTimeSystem(String),

    // Storage errors
    #[error("Preference storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Rendering errors
    #[error("Surface error: {0}")]
    Surface(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for decimal clock operations
pub type DeciResult<T> = Result<T, DeciError>;
