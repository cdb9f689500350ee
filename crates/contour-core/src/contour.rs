//! The contour entity: closed rings for one confidence level.

use crate::trace::{Ring, RingSet};
use scan_common::ScanGrid;

/// All rings of one confidence level, tagged with the resolved sigma value.
#[derive(Debug, Clone)]
pub struct Contour {
    sigma: u8,
    rings: Vec<Ring>,
}

impl Contour {
    pub fn new(rings: RingSet, sigma: u8) -> Self {
        Self { sigma, rings }
    }

    /// Confidence level in standard-deviation units (1..=5).
    pub fn sigma(&self) -> u8 {
        self.sigma
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Snap ring points back onto the boundary of the original (unpadded)
    /// grid. Traced curves can only leave the original axis ranges through
    /// the padding ring, so clamping pulls exactly that overhang onto the
    /// scan boundary.
    pub fn magnetic_boundaries(&mut self, grid: &ScanGrid) {
        for ring in &mut self.rings {
            for point in &mut ring.points {
                point.x = point.x.clamp(grid.x_min(), grid.x_max());
                point.y = point.y.clamp(grid.y_min(), grid.y_max());
            }
        }
    }
}
