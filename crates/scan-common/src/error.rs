//! Error types for scan-contour operations.

use thiserror::Error;

/// Result type alias using ScanError.
pub type ScanResult<T> = Result<T, ScanError>;

/// Primary error type for contour computation and drawing.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input grid violates a structural invariant.
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    /// An option value is outside its allowed range.
    #[error("invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// More sigma levels were requested for drawing than were produced.
    #[error("requested {requested} sigma contours but only {available} were produced")]
    NotEnoughContours { requested: usize, available: usize },

    /// A style sheet or palette could not be used.
    #[error("style error: {0}")]
    Style(String),

    /// Failed to read a style sheet from disk.
    #[error("failed to read style sheet: {0}")]
    StyleIo(String),
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Style(format!("JSON error: {}", err))
    }
}
