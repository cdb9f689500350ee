//! The confidence-contours controller.
//!
//! Owns the computed contour collection and the per-level styles, and
//! delegates drawing to the contours in descending sigma order.

use crate::contour::Contour;
use crate::extract::extract_ring_sets;
use crate::options::ContourOptions;
use crate::pad::add_boundary_bins;
use crate::sigma;
use crate::surface::{hill_from_valley, SurfaceType, HILL_OFFSET};
use crate::trace::MarchingSquaresTracer;
use scan_common::style::default_palette;
use scan_common::{
    ContourPalette, ContourStyle, FillPattern, LinePattern, ScanError, ScanGrid, ScanResult,
};
use tracing::debug;

/// How a contour is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Fill the ring interiors and stroke the outlines.
    Filled,
    /// Stroke dashed outlines only.
    LineOnly,
}

/// Drawing surface the controller delegates to. Implemented by the
/// rasterizing renderer; tests substitute recording painters.
pub trait ContourPainter {
    fn paint(&mut self, contour: &Contour, style: &ContourStyle, mode: DrawMode);
}

/// Computes and owns N-sigma confidence contours for one scan surface.
pub struct ConfidenceContours {
    options: ContourOptions,
    styles: Vec<ContourStyle>,
    contours: Vec<Contour>,
}

impl ConfidenceContours {
    pub fn new(options: ContourOptions) -> ScanResult<Self> {
        options.validate()?;
        let styles = default_palette().resolve(options.n_sigma_contours)?;
        Ok(Self {
            options,
            styles,
            contours: Vec::new(),
        })
    }

    /// Replace the per-level styles. Sequences shorter than the number of
    /// contours to draw are padded by replicating their last entry.
    pub fn set_style(&mut self, palette: &ContourPalette) -> ScanResult<()> {
        self.styles = palette.resolve(self.options.n_sigma_contours)?;
        Ok(())
    }

    /// Compute the contour collection for `grid`.
    ///
    /// Any previously computed collection is discarded. The input grid is
    /// only read; transformed and padded copies live for the duration of
    /// this call.
    pub fn compute(&mut self, grid: &ScanGrid, surface: SurfaceType) -> ScanResult<()> {
        grid.validate()?;
        if self.options.debug {
            debug!(
                nx = grid.nx(),
                ny = grid.ny(),
                min = grid.min_content(),
                max = grid.max_content(),
                ?surface,
                "computing confidence contours"
            );
        }
        self.contours.clear();

        let hill;
        let working = match surface {
            SurfaceType::Chi2 => {
                hill = hill_from_valley(grid, HILL_OFFSET);
                &hill
            }
            SurfaceType::PValue => grid,
        };

        let padded = add_boundary_bins(working)?;
        let mut tracer = MarchingSquaresTracer::new();
        let ring_sets = extract_ring_sets(&padded, surface, self.options.two_dim_cl, &mut tracer);
        self.contours = sigma::assign(ring_sets);

        if self.options.magnetic_boundaries {
            // descending sigma order, over the contours actually produced
            for contour in self.contours.iter_mut().rev() {
                contour.magnetic_boundaries(grid);
            }
        }

        debug!(n_contours = self.contours.len(), "contour computation done");
        Ok(())
    }

    /// The computed contours, ordered ascending in sigma (index 0 = tightest
    /// level present). Empty until `compute` has found at least one level.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn options(&self) -> &ContourOptions {
        &self.options
    }

    /// Draw filled contours, loosest sigma first so tighter regions end up
    /// on top.
    pub fn draw(&self, painter: &mut dyn ContourPainter) -> ScanResult<()> {
        self.draw_with(painter, DrawMode::Filled)
    }

    /// Draw dashed outlines only, in the same order as `draw`.
    pub fn draw_line_only(&self, painter: &mut dyn ContourPainter) -> ScanResult<()> {
        self.draw_with(painter, DrawMode::LineOnly)
    }

    fn draw_with(&self, painter: &mut dyn ContourPainter, mode: DrawMode) -> ScanResult<()> {
        // an empty collection draws nothing
        if self.contours.is_empty() {
            return Ok(());
        }
        let requested = self.options.n_sigma_contours;
        if requested > self.contours.len() {
            return Err(ScanError::NotEnoughContours {
                requested,
                available: self.contours.len(),
            });
        }

        for i in (0..requested).rev() {
            let style = &self.styles[i];
            match mode {
                DrawMode::Filled => painter.paint(&self.contours[i], style, mode),
                DrawMode::LineOnly => {
                    let mut outline = style.clone();
                    outline.line_pattern = LinePattern::Dashed;
                    outline.fill_pattern = FillPattern::None;
                    painter.paint(&self.contours[i], &outline, mode);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingPainter {
        painted: Vec<(u8, DrawMode, FillPattern)>,
    }

    impl ContourPainter for RecordingPainter {
        fn paint(&mut self, contour: &Contour, style: &ContourStyle, mode: DrawMode) {
            self.painted.push((contour.sigma(), mode, style.fill_pattern));
        }
    }

    /// Serialized with the tests that assert on the absolute state of the
    /// process-wide batch flag.
    fn compute_for(cc: &mut ConfidenceContours, grid: &ScanGrid, surface: SurfaceType) {
        let _lock = crate::batch::TEST_MODE_LOCK.lock().unwrap();
        cc.compute(grid, surface).unwrap();
    }

    fn computed(n_sigma: usize) -> ConfidenceContours {
        let options = ContourOptions {
            n_sigma_contours: n_sigma,
            ..ContourOptions::default()
        };
        let mut cc = ConfidenceContours::new(options).unwrap();
        let grid = test_utils::centered_chi2_bowl(41, 41);
        compute_for(&mut cc, &grid, SurfaceType::Chi2);
        cc
    }

    #[test]
    fn test_draw_descending_sigma_order() {
        let cc = computed(5);
        let mut painter = RecordingPainter { painted: vec![] };
        cc.draw(&mut painter).unwrap();
        let sigmas: Vec<u8> = painter.painted.iter().map(|(s, _, _)| *s).collect();
        assert_eq!(sigmas, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_draw_line_only_strips_fill() {
        let cc = computed(3);
        let mut painter = RecordingPainter { painted: vec![] };
        cc.draw_line_only(&mut painter).unwrap();
        assert_eq!(painter.painted.len(), 3);
        assert!(painter
            .painted
            .iter()
            .all(|(_, mode, fill)| *mode == DrawMode::LineOnly && *fill == FillPattern::None));
    }

    #[test]
    fn test_draw_empty_collection_is_noop() {
        let cc = ConfidenceContours::new(ContourOptions::default()).unwrap();
        let mut painter = RecordingPainter { painted: vec![] };
        cc.draw(&mut painter).unwrap();
        assert!(painter.painted.is_empty());
    }

    #[test]
    fn test_draw_more_than_available_fails() {
        let mut cc = computed(5);
        // shallow bowl: only three levels intersect
        let grid = test_utils::shallow_chi2_bowl(41, 41);
        compute_for(&mut cc, &grid, SurfaceType::Chi2);
        assert!(cc.contours().len() < 5);
        let mut painter = RecordingPainter { painted: vec![] };
        let err = cc.draw(&mut painter).unwrap_err();
        assert!(matches!(err, ScanError::NotEnoughContours { .. }));
    }

    #[test]
    fn test_recompute_clears_previous_collection() {
        let mut cc = computed(2);
        assert!(!cc.contours().is_empty());
        let flat = test_utils::constant_pvalue_grid(21, 21, 0.01);
        compute_for(&mut cc, &flat, SurfaceType::PValue);
        assert!(cc.contours().is_empty());
    }
}
