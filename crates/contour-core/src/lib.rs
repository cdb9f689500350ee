//! Confidence-region contour extraction for 2D test-statistic scans.
//!
//! Turns a chi2 or p-value scan grid into closed N-sigma contour polygons:
//! - valley-to-hill transform for chi2 surfaces
//! - boundary padding so every contour closes
//! - level-set tracing (marching squares behind a narrow trait)
//! - sigma assignment for the extracted ring sets
//! - optional magnetic-boundary pass against the original grid

pub mod batch;
pub mod confidence;
pub mod contour;
pub mod extract;
pub mod levels;
pub mod options;
pub mod pad;
pub mod sigma;
pub mod surface;
pub mod trace;

pub use confidence::{ConfidenceContours, ContourPainter, DrawMode};
pub use contour::Contour;
pub use options::ContourOptions;
pub use surface::{SurfaceType, HILL_OFFSET};
pub use trace::{LevelSetTracer, MarchingSquaresTracer, Point, Ring, RingSet};
