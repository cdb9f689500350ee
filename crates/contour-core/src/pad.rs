//! Boundary padding so level-set curves always close.

use scan_common::{ScanGrid, ScanResult};

/// Build a copy of `grid` with one extra ring of bins on every side.
///
/// The ring is filled with the source grid's minimum and the axis ranges are
/// extended by one bin width per side; interior bins are copied with their
/// indices shifted by one. A level-set tracer only returns closed polygons,
/// and padding with the least extreme value guarantees the traced region
/// never reaches the new boundary, even when the true region touches the
/// original scan edge.
pub fn add_boundary_bins(grid: &ScanGrid) -> ScanResult<ScanGrid> {
    let boundary = grid.min_content();
    let dx = grid.bin_width_x();
    let dy = grid.bin_width_y();

    let mut padded = ScanGrid::new(
        grid.nx() + 2,
        grid.ny() + 2,
        grid.x_min() - dx,
        grid.x_max() + dx,
        grid.y_min() - dy,
        grid.y_max() + dy,
    )?;

    for iy in 0..padded.ny() {
        for ix in 0..padded.nx() {
            let on_ring =
                ix == 0 || ix == padded.nx() - 1 || iy == 0 || iy == padded.ny() - 1;
            let value = if on_ring {
                boundary
            } else {
                grid.get(ix - 1, iy - 1)
            };
            padded.set(ix, iy, value);
        }
    }
    Ok(padded)
}
