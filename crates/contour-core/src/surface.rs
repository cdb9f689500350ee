//! Surface types and the chi2 valley-to-hill transform.

use scan_common::ScanGrid;

/// Offset applied by the valley-to-hill transform. Keeps transformed values
/// positive for realistic chi2 ranges, and all traced chi2 levels are
/// expressed relative to it.
pub const HILL_OFFSET: f64 = 30.0;

/// The kind of test statistic stored in a scan grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceType {
    /// Chi2 surface: smaller is more consistent with the best fit.
    Chi2,
    /// P-value surface: larger is more consistent with the null hypothesis.
    PValue,
}

/// Turn a chi2 valley into a hill: every bin `v` becomes
/// `offset + chi2min - v`, so the best-fit bin (content `chi2min`) ends up at
/// `offset` as the global maximum. The tracer extracts upper level sets, so
/// confidence regions must surround a maximum.
///
/// P-value surfaces are already hill-shaped and skip this step.
pub fn hill_from_valley(grid: &ScanGrid, offset: f64) -> ScanGrid {
    let chi2_min = grid.min_content();
    let mut hill = grid.clone();
    for iy in 0..grid.ny() {
        for ix in 0..grid.nx() {
            hill.set(ix, iy, offset + chi2_min - grid.get(ix, iy));
        }
    }
    hill
}
