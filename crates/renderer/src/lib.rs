//! Rasterization of confidence contours.
//!
//! Implements the core's painter trait over a tiny-skia pixmap and provides
//! a minimal PNG export of the finished canvas.

pub mod draw;
pub mod error;
pub mod png;

pub use draw::{SkiaPainter, Viewport};
pub use error::{RenderError, RenderResult};
