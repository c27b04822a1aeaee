// File: crates/chart-render-skia/tests/smoke.rs
// Purpose: End-to-end raster smoke test writing PNGs for every chart kind.

use ensemble_chart_core::overlay::BarLayout;
use ensemble_chart_core::series::{CategoricalFrequency, DensityCurve, DistributionSummary, ErrorBracket, ReferencePoint, TrendlineSeries};
use ensemble_chart_core::{Chart, ChartInputs, ChartKind, EntityId, RenderOptions};
use ensemble_chart_skia::SkiaRenderer;

fn charts() -> Vec<(&'static str, Chart)> {
    let box_plot = Chart::new(
        ChartKind::BoxPlot,
        ChartInputs {
            summaries: vec![
                DistributionSummary::new("1", 0.05, 0.10, 0.15, 0.16, 0.20, 0.30),
                DistributionSummary::new("2", 0.30, 0.45, 0.52, 0.52, 0.60, 0.75),
            ],
            references: Some(vec![ReferencePoint::new("2", 0.52)]),
            ..ChartInputs::default()
        },
    )
    .with_legend(["Ensemble mean", "Enacted plan"]);
    let density = Chart::new(
        ChartKind::Density,
        ChartInputs {
            densities: vec![DensityCurve::new("black", vec![(0.1, 0.2), (0.5, 3.0), (0.9, 0.1)]).with_ci(0.3, 0.7)],
            ..ChartInputs::default()
        },
    );
    let trend = Chart::new(
        ChartKind::Trend,
        ChartInputs {
            trendlines: vec![TrendlineSeries::new("fit", vec![(0.0, 0.2), (0.5, 0.5), (1.0, 0.7)])],
            brackets: vec![ErrorBracket::new("d4", 0.4, 0.3, 0.6)],
            ..ChartInputs::default()
        },
    );
    let bars = Chart::new(
        ChartKind::Frequency(BarLayout::Grouped),
        ChartInputs {
            frequencies: vec![
                CategoricalFrequency::new("R6/D1", 420.0, "raceblind"),
                CategoricalFrequency::new("R6/D1", 300.0, "vra"),
            ],
            ..ChartInputs::default()
        },
    );
    vec![("box", box_plot), ("density", density), ("trend", trend), ("bars", bars)]
}

#[test]
fn render_smoke_png() {
    let renderer = SkiaRenderer::new();
    let opts = RenderOptions::default();
    for (name, chart) in charts() {
        let scene = chart.build_scene(&opts, Some(&EntityId::from("1")));
        let out = std::path::PathBuf::from(format!("target/test_out/smoke_{name}.png"));
        renderer.render_to_png(&scene, &out).expect("render should succeed");
        let meta = std::fs::metadata(&out).expect("output exists");
        assert!(meta.len() > 0, "png should be non-empty");

        let bytes = renderer.render_to_png_bytes(&scene).expect("render bytes");
        assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    }
}

#[test]
fn placeholder_scene_renders() {
    let chart = Chart::new(ChartKind::BoxPlot, ChartInputs::default());
    let scene = chart.build_scene(&RenderOptions::default(), None);
    let bytes = SkiaRenderer::new().render_to_png_bytes(&scene).expect("render placeholder");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}

#[test]
fn zero_sized_scene_is_an_error() {
    let scene = ensemble_chart_core::Scene::new(0.0, 0.0, ensemble_chart_core::Rgba::rgb(0, 0, 0));
    assert!(SkiaRenderer::new().render_to_png_bytes(&scene).is_err());
}
