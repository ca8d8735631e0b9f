//! Error types for rolling metric windows.

use thiserror::Error;

/// Result type alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

/// Errors that can occur while building or feeding a window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("granularity must be a positive duration")]
    InvalidGranularity,

    #[error("index {index} is older than the newest recorded index {last}")]
    OutOfOrder { index: i64, last: i64 },

    #[error("timestamp is before the unix epoch")]
    BeforeEpoch,

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("config error: {0}")]
    Config(String),
}
