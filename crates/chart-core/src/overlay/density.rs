// File: crates/chart-core/src/overlay/density.rs
// Summary: Density curves (smoothed area + outline) with shaded confidence-interval bands.

use tracing::warn;

use super::{OverlayRenderer, XyScales};
use crate::config::OverlayStyle;
use crate::curve::{monotone_area, monotone_x};
use crate::geometry::{PointF, RectF};
use crate::scene::{Primitive, Rgba, Role, Style};
use crate::series::DensityCurve;
use crate::theme::{assign_colors, Theme};

pub struct DensityOverlay;

impl OverlayRenderer for DensityOverlay {
    type Scales = XyScales;
    type Row = DensityCurve;

    fn id(&self) -> &'static str { "density" }

    fn render(&self, scales: &XyScales, rows: &[DensityCurve], style: &OverlayStyle, theme: &Theme) -> Vec<Primitive> {
        let ids: Vec<&str> = rows.iter().map(|c| c.series_id.as_str()).collect();
        let colors = assign_colors(&ids, theme);
        let (top, bottom) = scales.y.range_extent();
        let baseline = scales.y.scale_clamped(0.0);

        // bands underneath every curve so no curve is washed out by a later band
        let mut bands = Vec::new();
        let mut curves = Vec::new();
        for (curve, color) in rows.iter().zip(colors) {
            let id = &curve.series_id;
            match curve.interval() {
                Ok(Some((low, high))) => bands.extend(
                    ci_band(scales, low, high, top, bottom, color, style).into_iter().map(|p| p.for_entity(id)),
                ),
                Ok(None) => {}
                Err(err) => warn!(series = %id, error = %err, "confidence band skipped"),
            }
            if let Err(err) = curve.validate_samples() {
                warn!(series = %id, error = %err, "density curve skipped");
                continue;
            }
            let points: Vec<PointF> = curve
                .samples
                .iter()
                .map(|&(x, y)| PointF::new(scales.x.scale(x), scales.y.scale_clamped(y)))
                .collect();
            let line = monotone_x(&points);
            if line.len() < 2 {
                warn!(series = %id, "density curve skipped (collapses to one pixel column)");
                continue;
            }
            curves.push(
                Primitive::path(monotone_area(&points, baseline), Style::fill(color.with_opacity(style.area_opacity)), Role::DensityArea)
                    .for_entity(id),
            );
            curves.push(Primitive::path(line, Style::stroke(color, 2.0), Role::DensityLine).for_entity(id));
        }
        bands.extend(curves);
        bands
    }
}

fn ci_band(scales: &XyScales, low: f64, high: f64, top: f32, bottom: f32, color: Rgba, style: &OverlayStyle) -> Vec<Primitive> {
    let x0 = scales.x.scale_clamped(low);
    let x1 = scales.x.scale_clamped(high);
    let rect = RectF::from_corners(PointF::new(x0, top), PointF::new(x1, bottom));
    let edge = Style::stroke(color, 1.0).dashed(5.0, 4.0);
    vec![
        Primitive::rect(rect, Style::fill(color.with_opacity(style.ci_opacity)), Role::CiBand),
        Primitive::line(PointF::new(x0, top), PointF::new(x0, bottom), edge, Role::CiEdge),
        Primitive::line(PointF::new(x1, top), PointF::new(x1, bottom), edge, Role::CiEdge),
    ]
}
