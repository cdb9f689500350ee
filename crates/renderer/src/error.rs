//! Error types for contour rasterization.

use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("failed to allocate {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),
}
