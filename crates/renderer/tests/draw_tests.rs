//! Tests for contour rasterization.

use contour_core::{
    ConfidenceContours, Contour, ContourOptions, ContourPainter, DrawMode, Point, Ring,
    SurfaceType,
};
use renderer::{SkiaPainter, Viewport};
use scan_common::{Color, ContourStyle, FillPattern, LinePattern};
use test_utils::centered_chi2_bowl;

fn square_ring(lo: f64, hi: f64) -> Ring {
    Ring {
        points: vec![
            Point::new(lo, lo),
            Point::new(hi, lo),
            Point::new(hi, hi),
            Point::new(lo, hi),
        ],
    }
}

fn red_style(fill: FillPattern) -> ContourStyle {
    ContourStyle {
        line_color: Color::rgba(0, 0, 0, 255),
        line_pattern: LinePattern::Solid,
        line_width: 2.0,
        fill_color: Color::rgba(255, 0, 0, 255),
        fill_pattern: fill,
    }
}

fn painter_4x4(px: u32) -> SkiaPainter {
    let viewport = Viewport::new(0.0, 4.0, 0.0, 4.0, px, px).unwrap();
    SkiaPainter::new(viewport).unwrap()
}

#[test]
fn test_filled_square_covers_center() {
    let contour = Contour::new(vec![square_ring(1.0, 3.0)], 1);
    let mut painter = painter_4x4(100);
    painter.paint(&contour, &red_style(FillPattern::Solid), DrawMode::Filled);

    let center = painter.pixmap().pixel(50, 50).unwrap();
    assert!(center.red() > 200, "center not filled: {:?}", center);

    let outside = painter.pixmap().pixel(5, 5).unwrap();
    assert_eq!(outside.alpha(), 0, "outside the ring must stay transparent");
}

#[test]
fn test_line_only_leaves_interior_empty() {
    let contour = Contour::new(vec![square_ring(1.0, 3.0)], 1);
    let mut painter = painter_4x4(100);
    painter.paint(&contour, &red_style(FillPattern::None), DrawMode::LineOnly);

    let center = painter.pixmap().pixel(50, 50).unwrap();
    assert_eq!(center.alpha(), 0, "interior must stay empty in line mode");

    // the outline passes through x = 1.0 -> pixel column 25
    let on_edge = painter.pixmap().pixel(25, 50).unwrap();
    assert!(on_edge.alpha() > 0, "outline missing");
}

#[test]
fn test_nested_rings_fill_with_hole() {
    let contour = Contour::new(vec![square_ring(0.5, 3.5), square_ring(1.5, 2.5)], 1);
    let mut painter = painter_4x4(100);
    painter.paint(&contour, &red_style(FillPattern::Solid), DrawMode::Filled);

    // between the rings: filled
    let between = painter.pixmap().pixel(50, 30).unwrap();
    assert!(between.red() > 200, "annulus not filled: {:?}", between);

    // inside the inner ring: even-odd hole
    let hole = painter.pixmap().pixel(50, 50).unwrap();
    assert_eq!(hole.alpha(), 0, "inner ring must punch a hole");
}

#[test]
fn test_degenerate_ring_is_ignored() {
    let contour = Contour::new(
        vec![Ring {
            points: vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
        }],
        1,
    );
    let mut painter = painter_4x4(50);
    painter.paint(&contour, &red_style(FillPattern::Solid), DrawMode::Filled);
    let data = painter.into_rgba();
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn test_full_pipeline_draw_and_export() {
    let grid = centered_chi2_bowl(41, 41);
    let options = ContourOptions {
        n_sigma_contours: 5,
        ..ContourOptions::default()
    };
    let mut cc = ConfidenceContours::new(options).unwrap();
    cc.compute(&grid, SurfaceType::Chi2).unwrap();

    let viewport = Viewport::for_grid(&grid, 200, 200).unwrap();
    let mut painter = SkiaPainter::new(viewport).unwrap();
    cc.draw(&mut painter).unwrap();

    // the 5-sigma region spans radius 5 of a 16-unit range: the canvas
    // center must be painted, the corners must not
    let center = painter.pixmap().pixel(100, 100).unwrap();
    assert!(center.alpha() > 0);
    let corner = painter.pixmap().pixel(2, 2).unwrap();
    assert_eq!(corner.alpha(), 0);

    let png = painter.to_png().unwrap();
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn test_line_only_pipeline_leaves_best_fit_unpainted() {
    let grid = centered_chi2_bowl(41, 41);
    let options = ContourOptions {
        n_sigma_contours: 2,
        ..ContourOptions::default()
    };
    let mut cc = ConfidenceContours::new(options).unwrap();
    cc.compute(&grid, SurfaceType::Chi2).unwrap();

    let viewport = Viewport::for_grid(&grid, 200, 200).unwrap();
    let mut painter = SkiaPainter::new(viewport).unwrap();
    cc.draw_line_only(&mut painter).unwrap();

    // outlines only: the best-fit point itself stays transparent
    let center = painter.pixmap().pixel(100, 100).unwrap();
    assert_eq!(center.alpha(), 0);
}
