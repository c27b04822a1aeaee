// File: crates/chart-core/tests/axis.rs
// Purpose: Nice tick generation, tick formatting and axis primitives.

use ensemble_chart_core::axis::{nice_ticks, render_band, render_linear, Axis, AxisPosition, TickFormat};
use ensemble_chart_core::geometry::RectF;
use ensemble_chart_core::scale::{BandScale, LinearScale};
use ensemble_chart_core::scene::{Role, Shape};
use ensemble_chart_core::Theme;

#[test]
fn unit_domain_ticks_are_nice() {
    let ticks = nice_ticks(0.0, 1.0, 5);
    assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
}

#[test]
fn ticks_never_leave_the_domain() {
    for (lo, hi) in [(0.13, 0.87), (3.0, 701.0), (-2.5, 2.5), (0.0, 0.7)] {
        let ticks = nice_ticks(lo, hi, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| t >= lo && t <= hi), "{ticks:?} outside [{lo}, {hi}]");
    }
}

#[test]
fn boundary_multiples_are_kept() {
    // 0.7 / 0.1 lands just below 7 in floating point
    let ticks = nice_ticks(0.0, 0.7, 8);
    assert_eq!(ticks.len(), 8);
    assert_eq!(ticks.last().copied(), Some(0.7));
}

#[test]
fn narrow_span_between_steps_falls_back_to_its_ends() {
    // step 2 has no multiple inside [0.5, 1.9]
    assert_eq!(nice_ticks(0.5, 1.9, 2), vec![0.5, 1.9]);
}

#[test]
fn single_value_domain_yields_one_tick() {
    assert_eq!(nice_ticks(0.5, 0.5, 5), vec![0.5]);
    assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
}

#[test]
fn formats() {
    assert_eq!(TickFormat::Percent.format(0.42), "42%");
    assert_eq!(TickFormat::Percent.format(1.0), "100%");
    assert_eq!(TickFormat::Fixed(2).format(1.0 / 3.0), "0.33");
    assert_eq!(TickFormat::Integer.format(699.6), "700");
}

#[test]
fn linear_axis_has_one_gridline_and_label_per_tick() {
    let scale = LinearScale::new((0.0, 1.0), (300.0, 0.0));
    let plot = RectF::from_ltwh(0.0, 0.0, 400.0, 300.0);
    let axis = Axis::new("Share", TickFormat::Percent);
    let prims = render_linear(&axis, &scale, AxisPosition::Left, &plot, &Theme::dark());
    let grid = prims.iter().filter(|p| p.role == Role::Gridline).count();
    let labels: Vec<&str> = prims
        .iter()
        .filter(|p| p.role == Role::TickLabel)
        .filter_map(|p| match &p.shape {
            Shape::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(grid, 6);
    assert_eq!(labels, vec!["0%", "20%", "40%", "60%", "80%", "100%"]);
    assert_eq!(prims.iter().filter(|p| p.role == Role::AxisTitle).count(), 1);
    assert_eq!(prims.iter().filter(|p| p.role == Role::AxisLine).count(), 1);
}

#[test]
fn band_axis_labels_sit_at_band_centers() {
    let scale = BandScale::new(["1", "2", "3"], (0.0, 300.0), 0.2);
    let plot = RectF::from_ltwh(0.0, 0.0, 300.0, 200.0);
    let axis = Axis::new("", TickFormat::Integer);
    let prims = render_band(&axis, &scale, &plot, &Theme::light());
    let xs: Vec<f32> = prims
        .iter()
        .filter_map(|p| match (&p.shape, p.role) {
            (Shape::Text { at, .. }, Role::TickLabel) => Some(at.x),
            _ => None,
        })
        .collect();
    assert_eq!(xs.len(), 3);
    for (x, want) in xs.iter().zip([50.0f32, 150.0, 250.0]) {
        assert!((x - want).abs() < 1e-3);
    }
    // empty title is not drawn
    assert_eq!(prims.iter().filter(|p| p.role == Role::AxisTitle).count(), 0);
}
