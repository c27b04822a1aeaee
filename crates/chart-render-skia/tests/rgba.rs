// File: crates/chart-render-skia/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use ensemble_chart_core::scene::{Role, Shape};
use ensemble_chart_core::series::DistributionSummary;
use ensemble_chart_core::{Chart, ChartInputs, ChartKind, RenderOptions, Theme};
use ensemble_chart_skia::SkiaRenderer;

#[test]
fn render_rgba8_buffer() {
    let chart = Chart::new(
        ChartKind::BoxPlot,
        ChartInputs {
            summaries: vec![DistributionSummary::new("1", 0.05, 0.10, 0.40, 0.42, 0.70, 0.90)],
            ..ChartInputs::default()
        },
    );
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() }; // avoid font variance
    let scene = chart.build_scene(&opts, None);
    let (px, w, h, stride) = SkiaRenderer::new().render_to_rgba8(&scene).expect("rgba render");
    assert_eq!((w, h), (opts.width, opts.height));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left pixel is background (RGBA)
    let bg = Theme::dark().background;
    assert_eq!(&px[0..4], &[bg.r, bg.g, bg.b, 255]);

    // Inside the box, away from the median and whisker, something other than background was drawn
    let (origin, rect) = scene
        .primitives()
        .find_map(|(p, t)| match (&p.shape, p.role) {
            (Shape::Rect(r), Role::Box) => Some((t, *r)),
            _ => None,
        })
        .expect("box rect");
    let x = (origin.x + rect.left + 4.0) as usize;
    let y = (origin.y + rect.bottom() - 6.0) as usize;
    let i = y * stride + x * 4;
    assert_ne!(&px[i..i + 3], &[bg.r, bg.g, bg.b]);
}
