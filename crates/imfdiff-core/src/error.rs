//! Error types for IMF Differ core types.

use thiserror::Error;

/// Errors raised while building or parsing time values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid timecode '{value}': {reason}")]
    InvalidTimecode { value: String, reason: String },

    #[error("Invalid edit rate '{0}'")]
    InvalidEditRate(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
