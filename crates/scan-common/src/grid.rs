//! Scan grids: rectangular 2D binned test-statistic surfaces.

use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};

/// A rectangular 2D grid of test-statistic values (chi2 or p-value).
///
/// Bins are indexed by `(ix, iy)` with `ix` in `0..nx` and `iy` in `0..ny`,
/// stored row-major (`iy * nx + ix`). Both axes are uniformly binned: bin
/// `ix` spans `[x_min + ix * dx, x_min + (ix + 1) * dx]` with
/// `dx = (x_max - x_min) / nx`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanGrid {
    nx: usize,
    ny: usize,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    contents: Vec<f64>,
}

impl ScanGrid {
    /// Create a zero-filled grid.
    pub fn new(
        nx: usize,
        ny: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> ScanResult<Self> {
        let grid = Self {
            nx,
            ny,
            x_min,
            x_max,
            y_min,
            y_max,
            contents: vec![0.0; nx.saturating_mul(ny)],
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Create a grid from existing bin contents (row-major, `iy * nx + ix`).
    pub fn with_contents(
        nx: usize,
        ny: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        contents: Vec<f64>,
    ) -> ScanResult<Self> {
        let grid = Self {
            nx,
            ny,
            x_min,
            x_max,
            y_min,
            y_max,
            contents,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Check the structural invariants: at least one bin per axis, positive
    /// bin widths, contents length matching the bin count.
    pub fn validate(&self) -> ScanResult<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(ScanError::MalformedGrid(format!(
                "bin counts must be >= 1, got {}x{}",
                self.nx, self.ny
            )));
        }
        if !(self.x_max > self.x_min) {
            return Err(ScanError::MalformedGrid(format!(
                "x range [{}, {}] has non-positive bin width",
                self.x_min, self.x_max
            )));
        }
        if !(self.y_max > self.y_min) {
            return Err(ScanError::MalformedGrid(format!(
                "y range [{}, {}] has non-positive bin width",
                self.y_min, self.y_max
            )));
        }
        if self.contents.len() != self.nx * self.ny {
            return Err(ScanError::MalformedGrid(format!(
                "contents length {} does not match {}x{} bins",
                self.contents.len(),
                self.nx,
                self.ny
            )));
        }
        Ok(())
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Bin width along x.
    pub fn bin_width_x(&self) -> f64 {
        (self.x_max - self.x_min) / self.nx as f64
    }

    /// Bin width along y.
    pub fn bin_width_y(&self) -> f64 {
        (self.y_max - self.y_min) / self.ny as f64
    }

    /// Center coordinate of bin column `ix`.
    pub fn bin_center_x(&self, ix: usize) -> f64 {
        self.x_min + (ix as f64 + 0.5) * self.bin_width_x()
    }

    /// Center coordinate of bin row `iy`.
    pub fn bin_center_y(&self, iy: usize) -> f64 {
        self.y_min + (iy as f64 + 0.5) * self.bin_width_y()
    }

    /// Bin content at `(ix, iy)`.
    ///
    /// Panics if the index is out of range; indices are produced by loops
    /// over `nx()`/`ny()` in all callers.
    pub fn get(&self, ix: usize, iy: usize) -> f64 {
        assert!(ix < self.nx && iy < self.ny, "bin index out of range");
        self.contents[iy * self.nx + ix]
    }

    /// Set the bin content at `(ix, iy)`.
    pub fn set(&mut self, ix: usize, iy: usize, value: f64) {
        assert!(ix < self.nx && iy < self.ny, "bin index out of range");
        self.contents[iy * self.nx + ix] = value;
    }

    /// Minimum bin content. Non-finite bins are ignored.
    pub fn min_content(&self) -> f64 {
        self.contents
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min)
    }

    /// Maximum bin content. Non-finite bins are ignored.
    pub fn max_content(&self) -> f64 {
        self.contents
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Raw contents in row-major order.
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }
}
