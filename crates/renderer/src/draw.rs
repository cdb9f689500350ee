//! Contour rasterization onto a tiny-skia pixmap.

use crate::error::{RenderError, RenderResult};
use contour_core::{Contour, ContourPainter, DrawMode, Ring};
use scan_common::{ContourStyle, FillPattern, LinePattern, ScanGrid};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};
use tracing::debug;

/// Maps data coordinates (scan parameter units) onto pixel coordinates.
///
/// The y axis is flipped: larger data y is further up, pixel y grows
/// downward.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        width: u32,
        height: u32,
    ) -> RenderResult<Self> {
        if !(x_max > x_min) || !(y_max > y_min) {
            return Err(RenderError::InvalidViewport(format!(
                "empty data range [{}, {}] x [{}, {}]",
                x_min, x_max, y_min, y_max
            )));
        }
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport(format!(
                "zero pixel size {}x{}",
                width, height
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            width,
            height,
        })
    }

    /// Viewport covering the axis ranges of `grid`.
    pub fn for_grid(grid: &ScanGrid, width: u32, height: u32) -> RenderResult<Self> {
        Self::new(
            grid.x_min(),
            grid.x_max(),
            grid.y_min(),
            grid.y_max(),
            width,
            height,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let px = (x - self.x_min) / (self.x_max - self.x_min) * self.width as f64;
        let py = (1.0 - (y - self.y_min) / (self.y_max - self.y_min)) * self.height as f64;
        (px as f32, py as f32)
    }
}

/// [`ContourPainter`] implementation drawing anti-aliased contours onto an
/// RGBA pixmap.
pub struct SkiaPainter {
    viewport: Viewport,
    pixmap: Pixmap,
}

impl SkiaPainter {
    /// Create a painter with a transparent canvas.
    pub fn new(viewport: Viewport) -> RenderResult<Self> {
        let pixmap =
            Pixmap::new(viewport.width(), viewport.height()).ok_or(RenderError::CanvasAllocation {
                width: viewport.width(),
                height: viewport.height(),
            })?;
        Ok(Self { viewport, pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Finish painting and return the RGBA pixel buffer.
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixmap.take()
    }

    /// Encode the current canvas as a PNG image.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        crate::png::encode_rgba(
            self.pixmap.data(),
            self.viewport.width() as usize,
            self.viewport.height() as usize,
        )
    }

    fn append_ring(&self, pb: &mut PathBuilder, ring: &Ring) {
        if ring.points.len() < 3 {
            return;
        }
        let (x0, y0) = self.viewport.to_pixel(ring.points[0].x, ring.points[0].y);
        pb.move_to(x0, y0);
        for point in &ring.points[1..] {
            let (x, y) = self.viewport.to_pixel(point.x, point.y);
            pb.line_to(x, y);
        }
        pb.close();
    }

    fn ring_path(&self, ring: &Ring) -> Option<Path> {
        let mut pb = PathBuilder::new();
        self.append_ring(&mut pb, ring);
        pb.finish()
    }

    fn fill_rings(&mut self, contour: &Contour, style: &ContourStyle) {
        let (r, g, b, a) = style.fill_color.to_rgba();
        // hatched fills are approximated by a translucent solid
        let alpha = match style.fill_pattern {
            FillPattern::Solid => a,
            FillPattern::Hatched => a / 2,
            FillPattern::None => return,
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, alpha);
        paint.anti_alias = true;

        // one path over all rings so nested rings become holes
        let mut pb = PathBuilder::new();
        for ring in contour.rings() {
            self.append_ring(&mut pb, ring);
        }
        if let Some(path) = pb.finish() {
            self.pixmap
                .fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }
    }

    fn stroke_rings(&mut self, contour: &Contour, style: &ContourStyle) {
        let (r, g, b, a) = style.line_color.to_rgba();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            dash: dash_for(style.line_pattern),
            ..Stroke::default()
        };

        for ring in contour.rings() {
            if let Some(path) = self.ring_path(ring) {
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }
}

impl ContourPainter for SkiaPainter {
    fn paint(&mut self, contour: &Contour, style: &ContourStyle, mode: DrawMode) {
        debug!(
            sigma = contour.sigma(),
            n_rings = contour.rings().len(),
            ?mode,
            "painting contour"
        );
        if mode == DrawMode::Filled {
            self.fill_rings(contour, style);
        }
        self.stroke_rings(contour, style);
    }
}

fn dash_for(pattern: LinePattern) -> Option<StrokeDash> {
    match pattern {
        LinePattern::Solid => None,
        LinePattern::Dashed => StrokeDash::new(vec![12.0, 6.0], 0.0),
        LinePattern::Dotted => StrokeDash::new(vec![2.0, 4.0], 0.0),
        LinePattern::DashDot => StrokeDash::new(vec![12.0, 6.0, 2.0, 6.0], 0.0),
    }
}
