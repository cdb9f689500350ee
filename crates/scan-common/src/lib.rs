//! Common types shared across the scan-contours crates.

pub mod error;
pub mod grid;
pub mod style;

pub use error::{ScanError, ScanResult};
pub use grid::ScanGrid;
pub use style::{Color, ContourPalette, ContourStyle, FillPattern, LinePattern, StyleSheet};
