//! Level-set tracing over scan grids using marching squares.
//!
//! The tracer is deliberately narrow: configure five levels, trace once, get
//! five ring sets back. The packed output convention (see
//! [`MarchingSquaresTracer`]) is part of the trait contract and is accounted
//! for by the sigma assignment downstream.

use crate::levels::N_SIGMA_LEVELS;
use scan_common::ScanGrid;
use tracing::{debug, warn};

/// A point in data coordinates (scan parameter units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line segment between two level crossings.
#[derive(Debug, Clone)]
struct Segment {
    start: Point,
    end: Point,
}

/// One closed polygon ring. Points are stored without repeating the first
/// point; consumers treat the last point as connected back to the first.
#[derive(Debug, Clone)]
pub struct Ring {
    pub points: Vec<Point>,
}

impl Ring {
    /// Arithmetic mean of the ring points.
    pub fn centroid(&self) -> Point {
        let n = self.points.len().max(1) as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }
}

/// All rings returned for a single requested level; empty when the level
/// does not intersect the surface.
pub type RingSet = Vec<Ring>;

/// The level-set tracing capability the extraction step calls into.
///
/// Implementations fill their output from index 0 with the ring sets of the
/// non-empty levels, loosest first, leaving trailing entries empty: the
/// position of a level in the output depends on how many requested levels
/// actually intersect the surface.
pub trait LevelSetTracer {
    /// Set the five target levels, in ascending level-value order.
    fn configure_levels(&mut self, levels: [f64; N_SIGMA_LEVELS]);

    /// Trace all configured levels over `grid` in a single pass.
    fn trace(&mut self, grid: &ScanGrid) -> [RingSet; N_SIGMA_LEVELS];
}

/// Marching-squares implementation of [`LevelSetTracer`].
///
/// Grid bin centers are the sample points; crossings are found by linear
/// interpolation along cell edges and chained into closed rings in data
/// coordinates.
#[derive(Debug, Default)]
pub struct MarchingSquaresTracer {
    levels: Option<[f64; N_SIGMA_LEVELS]>,
}

impl MarchingSquaresTracer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LevelSetTracer for MarchingSquaresTracer {
    fn configure_levels(&mut self, levels: [f64; N_SIGMA_LEVELS]) {
        self.levels = Some(levels);
    }

    fn trace(&mut self, grid: &ScanGrid) -> [RingSet; N_SIGMA_LEVELS] {
        let mut output: [RingSet; N_SIGMA_LEVELS] = std::array::from_fn(|_| Vec::new());
        let Some(levels) = self.levels else {
            warn!("trace called before configure_levels, returning empty ring sets");
            return output;
        };

        let mut filled = 0;
        for level in levels {
            let segments = march_squares(grid, level);
            let rings = chain_into_rings(segments, closure_tolerance(grid));
            debug!(level, n_rings = rings.len(), "traced level set");
            if !rings.is_empty() {
                output[filled] = rings;
                filled += 1;
            }
        }
        output
    }
}

/// Endpoint matching tolerance: crossings on a shared cell edge are computed
/// from identical inputs on both sides, so this only absorbs rounding.
fn closure_tolerance(grid: &ScanGrid) -> f64 {
    1e-9 * (grid.bin_width_x() + grid.bin_width_y())
}

/// Walk every cell between adjacent bin centers and emit the level crossings.
fn march_squares(grid: &ScanGrid, level: f64) -> Vec<Segment> {
    if grid.nx() < 2 || grid.ny() < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for iy in 0..grid.ny() - 1 {
        for ix in 0..grid.nx() - 1 {
            // Cell corners at bin centers, lower-left first
            let v00 = grid.get(ix, iy);
            let v10 = grid.get(ix + 1, iy);
            let v01 = grid.get(ix, iy + 1);
            let v11 = grid.get(ix + 1, iy + 1);

            if !(v00.is_finite() && v10.is_finite() && v01.is_finite() && v11.is_finite()) {
                continue;
            }

            let mut case = 0u8;
            if v00 >= level {
                case |= 1;
            }
            if v10 >= level {
                case |= 2;
            }
            if v11 >= level {
                case |= 4;
            }
            if v01 >= level {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let x0 = grid.bin_center_x(ix);
            let x1 = grid.bin_center_x(ix + 1);
            let y0 = grid.bin_center_y(iy);
            let y1 = grid.bin_center_y(iy + 1);

            let bottom = interpolate(x0, y0, x1, y0, v00, v10, level);
            let right = interpolate(x1, y0, x1, y1, v10, v11, level);
            let top = interpolate(x0, y1, x1, y1, v01, v11, level);
            let left = interpolate(x0, y0, x0, y1, v00, v01, level);

            let mut push = |start: Point, end: Point| segments.push(Segment { start, end });
            match case {
                1 | 14 => push(left, bottom),
                2 | 13 => push(bottom, right),
                3 | 12 => push(left, right),
                4 | 11 => push(right, top),
                6 | 9 => push(bottom, top),
                7 | 8 => push(left, top),
                // saddles: two separate crossings
                5 => {
                    push(left, top);
                    push(bottom, right);
                }
                10 => {
                    push(left, bottom);
                    push(top, right);
                }
                _ => {}
            }
        }
    }
    segments
}

/// Linear interpolation of the level crossing along one cell edge.
fn interpolate(x1: f64, y1: f64, x2: f64, y2: f64, v1: f64, v2: f64, level: f64) -> Point {
    if (v2 - v1).abs() < f64::EPSILON {
        return Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }
    let t = ((level - v1) / (v2 - v1)).clamp(0.0, 1.0);
    Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

fn close_to(a: Point, b: Point, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

/// Chain unordered segments into rings.
///
/// Every crossing point is shared by exactly two segments, so following
/// matching endpoints from any starting segment walks a full cycle. Chains
/// that fail to close are dropped with a warning; they cannot occur on padded
/// grids, where no level set reaches the data boundary.
fn chain_into_rings(segments: Vec<Segment>, tolerance: f64) -> Vec<Ring> {
    let mut rings = Vec::new();
    let mut used = vec![false; segments.len()];

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let mut points = vec![segments[start_idx].start, segments[start_idx].end];

        loop {
            let tail = *points.last().expect("chain always has points");
            let next = segments.iter().enumerate().find(|(i, seg)| {
                !used[*i] && (close_to(seg.start, tail, tolerance) || close_to(seg.end, tail, tolerance))
            });
            match next {
                Some((i, seg)) => {
                    used[i] = true;
                    if close_to(seg.start, tail, tolerance) {
                        points.push(seg.end);
                    } else {
                        points.push(seg.start);
                    }
                }
                None => break,
            }
        }

        let closed = points.len() > 2 && close_to(points[0], *points.last().unwrap(), tolerance);
        if closed {
            points.pop();
            rings.push(Ring { points });
        } else {
            warn!(
                n_points = points.len(),
                "discarding open level-set polyline"
            );
        }
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak_grid() -> ScanGrid {
        // 5x5 grid with a single central peak
        let mut grid = ScanGrid::new(5, 5, 0.0, 5.0, 0.0, 5.0).unwrap();
        grid.set(2, 2, 10.0);
        grid
    }

    fn configured(levels: [f64; N_SIGMA_LEVELS]) -> MarchingSquaresTracer {
        let mut tracer = MarchingSquaresTracer::new();
        tracer.configure_levels(levels);
        tracer
    }

    #[test]
    fn test_flat_grid_has_no_crossings() {
        let grid = ScanGrid::new(4, 4, 0.0, 4.0, 0.0, 4.0).unwrap();
        let sets = configured([1.0, 2.0, 3.0, 4.0, 5.0]).trace(&grid);
        assert!(sets.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_single_peak_gives_one_closed_ring() {
        let sets = configured([5.0, 20.0, 40.0, 60.0, 80.0]).trace(&peak_grid());
        // only the 5.0 level crosses; packed at index 0
        assert_eq!(sets[0].len(), 1);
        assert!(sets[1..].iter().all(|s| s.is_empty()));
        let ring = &sets[0][0];
        assert!(ring.points.len() >= 4);
        // ring surrounds the peak bin center at (2.5, 2.5)
        let c = ring.centroid();
        assert!((c.x - 2.5).abs() < 0.2);
        assert!((c.y - 2.5).abs() < 0.2);
    }

    #[test]
    fn test_non_empty_levels_pack_from_front() {
        // levels 2 and 6 cross the peak, 20/40/60 do not; both crossing
        // levels must land at the front of the output
        let sets = configured([2.0, 6.0, 20.0, 40.0, 60.0]).trace(&peak_grid());
        assert!(!sets[0].is_empty());
        assert!(!sets[1].is_empty());
        assert!(sets[2..].iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_tighter_level_is_nested_inside_looser() {
        let mut grid = ScanGrid::new(21, 21, -10.5, 10.5, -10.5, 10.5).unwrap();
        for iy in 0..21 {
            for ix in 0..21 {
                let x = grid.bin_center_x(ix);
                let y = grid.bin_center_y(iy);
                grid.set(ix, iy, 100.0 - (x * x + y * y));
            }
        }
        let sets = configured([36.0, 75.0, 96.0, 98.0, 99.0]).trace(&grid);
        // 100 - r^2 >= 36 inside r = 8; >= 75 inside r = 5
        assert_eq!(sets[0].len(), 1);
        assert_eq!(sets[1].len(), 1);
        let r_loose = max_radius(&sets[0][0]);
        let r_tight = max_radius(&sets[1][0]);
        assert!((r_loose - 8.0).abs() < 0.5, "r_loose = {}", r_loose);
        assert!((r_tight - 5.0).abs() < 0.5, "r_tight = {}", r_tight);
        assert!(r_tight < r_loose);
    }

    #[test]
    fn test_unconfigured_tracer_returns_empty() {
        let sets = MarchingSquaresTracer::new().trace(&peak_grid());
        assert!(sets.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_non_finite_cells_are_skipped() {
        let mut grid = peak_grid();
        grid.set(0, 0, f64::NAN);
        let sets = configured([5.0, 20.0, 40.0, 60.0, 80.0]).trace(&grid);
        assert_eq!(sets[0].len(), 1);
    }

    fn max_radius(ring: &Ring) -> f64 {
        ring.points
            .iter()
            .map(|p| (p.x * p.x + p.y * p.y).sqrt())
            .fold(0.0, f64::max)
    }
}
