// File: crates/chart-core/src/overlay/boxplot.rs
// Summary: Box-and-whisker anatomy (box, median, dashed whiskers, caps, mean and reference markers).

use tracing::warn;

use super::{CategoryScales, OverlayRenderer};
use crate::config::OverlayStyle;
use crate::geometry::{PointF, RectF};
use crate::scale::Band;
use crate::scene::{Primitive, Role, Style};
use crate::series::{DistributionSummary, ReferencePoint};
use crate::theme::Theme;

/// A distribution row joined with the reference value for its category, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPlotRow {
    pub summary: DistributionSummary,
    pub reference: Option<f64>,
}

impl BoxPlotRow {
    /// Pair every summary with the first reference point of the same category.
    pub fn join(summaries: &[DistributionSummary], references: &[ReferencePoint]) -> Vec<Self> {
        summaries
            .iter()
            .map(|s| BoxPlotRow {
                summary: s.clone(),
                reference: references
                    .iter()
                    .find(|r| r.category_id == s.category_id)
                    .map(|r| r.value)
                    .filter(|v| v.is_finite()),
            })
            .collect()
    }
}

pub struct BoxWhiskerOverlay;

impl OverlayRenderer for BoxWhiskerOverlay {
    type Scales = CategoryScales;
    type Row = BoxPlotRow;

    fn id(&self) -> &'static str { "box_whisker" }

    fn render(&self, scales: &CategoryScales, rows: &[BoxPlotRow], style: &OverlayStyle, theme: &Theme) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(rows.len() * 9);
        for row in rows {
            let id = &row.summary.category_id;
            if let Err(err) = row.summary.validate() {
                warn!(category = %id, error = %err, "box row skipped");
                continue;
            }
            let Some(band) = scales.x.band(id.as_str()) else {
                warn!(category = %id, "box row has no band on the category axis");
                continue;
            };
            out.extend(render_row(scales, band, row, style, theme).into_iter().map(|p| p.for_entity(id)));
        }
        out
    }
}

fn render_row(scales: &CategoryScales, band: Band, row: &BoxPlotRow, style: &OverlayStyle, theme: &Theme) -> Vec<Primitive> {
    let s = &row.summary;
    let y = |v: f64| scales.y.scale_clamped(v);
    let cx = band.center();
    let half_box = band.width * style.box_width_fraction * 0.5;
    let half_cap = band.width * style.cap_width_fraction * 0.5;
    let (y_q1, y_q3) = (y(s.q1), y(s.q3));

    let mut out = Vec::with_capacity(9);
    let whisker = Style::stroke(theme.whisker, 1.0).dashed(4.0, 3.0);
    let cap = Style::stroke(theme.whisker, 1.5);
    // whiskers first so the box covers their ends
    for (end, from) in [(s.min, y_q1), (s.max, y_q3)] {
        if let Some(v) = end {
            let ye = y(v);
            out.push(Primitive::line(PointF::new(cx, from), PointF::new(cx, ye), whisker, Role::Whisker));
            out.push(Primitive::line(PointF::new(cx - half_cap, ye), PointF::new(cx + half_cap, ye), cap, Role::WhiskerCap));
        }
    }

    let rect = RectF::from_corners(PointF::new(cx - half_box, y_q3), PointF::new(cx + half_box, y_q1));
    out.push(Primitive::rect(rect, Style::fill_stroke(theme.box_fill, theme.box_stroke, 1.0), Role::Box));

    let y_med = y(s.median);
    out.push(Primitive::line(
        PointF::new(cx - half_box, y_med),
        PointF::new(cx + half_box, y_med),
        Style::stroke(theme.median, 2.0),
        Role::Median,
    ));

    // markers: mean first, then reference, spread apart when they collide
    let mut markers: Vec<(Role, f32)> = Vec::with_capacity(2);
    if let Some(mean) = s.mean {
        markers.push((Role::MeanMarker, y(mean)));
    }
    if let Some(reference) = row.reference {
        markers.push((Role::ReferenceMarker, y(reference)));
    }
    let ys: Vec<f32> = markers.iter().map(|m| m.1).collect();
    let dxs = spread_markers(&ys, style.collision_threshold_px, style.marker_offset_px);
    for ((role, my), dx) in markers.into_iter().zip(dxs) {
        let center = PointF::new(cx + dx, my);
        let marker_style = match role {
            Role::ReferenceMarker => Style::stroke(theme.reference_marker, 2.0),
            _ => Style::fill_stroke(theme.mean_marker, theme.background, 1.0),
        };
        out.push(Primitive::circle(center, style.marker_radius_px, marker_style, role));
    }
    out
}

/// Horizontal offsets for markers drawn at pixel heights `ys` on one category center.
///
/// Markers whose heights chain within `threshold` form a cluster; a cluster of
/// `k > 1` markers is spread symmetrically with `2 * offset` spacing in input
/// order, so two colliding markers land at `-offset` and `+offset`. Isolated
/// markers stay centered.
pub fn spread_markers(ys: &[f32], threshold: f32, offset: f32) -> Vec<f32> {
    let mut dx = vec![0.0f32; ys.len()];
    let mut order: Vec<usize> = (0..ys.len()).filter(|&i| ys[i].is_finite()).collect();
    order.sort_by(|&a, &b| ys[a].total_cmp(&ys[b]));

    let mut start = 0usize;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && ys[order[end]] - ys[order[end - 1]] <= threshold {
            end += 1;
        }
        let mut cluster: Vec<usize> = order[start..end].to_vec();
        if cluster.len() > 1 {
            cluster.sort_unstable();
            let mid = (cluster.len() - 1) as f32 * 0.5;
            for (pos, &i) in cluster.iter().enumerate() {
                dx[i] = (pos as f32 - mid) * 2.0 * offset;
            }
        }
        start = end;
    }
    dx
}
