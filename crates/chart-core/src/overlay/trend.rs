// File: crates/chart-core/src/overlay/trend.rs
// Summary: Monotone trendlines and three-segment error brackets.

use tracing::{debug, warn};

use super::{OverlayRenderer, XyScales};
use crate::config::OverlayStyle;
use crate::curve::monotone_x;
use crate::geometry::PointF;
use crate::scene::{Primitive, Role, Style};
use crate::series::{ErrorBracket, TrendlineSeries};
use crate::theme::{assign_colors, Theme};

pub struct TrendlineOverlay;

impl OverlayRenderer for TrendlineOverlay {
    type Scales = XyScales;
    type Row = TrendlineSeries;

    fn id(&self) -> &'static str { "trendline" }

    fn render(&self, scales: &XyScales, rows: &[TrendlineSeries], style: &OverlayStyle, theme: &Theme) -> Vec<Primitive> {
        let ids: Vec<&str> = rows.iter().map(|t| t.series_id.as_str()).collect();
        let colors = if rows.len() == 1 { vec![theme.trendline] } else { assign_colors(&ids, theme) };
        let mut out = Vec::with_capacity(rows.len());
        for (series, color) in rows.iter().zip(colors) {
            let id = &series.series_id;
            if series.points.len() < 2 {
                warn!(series = %id, points = series.points.len(), "trendline skipped (needs two points)");
                continue;
            }
            let reduced;
            let series = if series.points.len() > style.max_trend_points {
                reduced = series.downsample(style.max_trend_points);
                debug!(series = %id, from = series.points.len(), to = reduced.points.len(), "trendline downsampled");
                &reduced
            } else {
                series
            };
            let points: Vec<PointF> = series
                .points
                .iter()
                .map(|&(x, y)| PointF::new(scales.x.scale(x), scales.y.scale_clamped(y)))
                .collect();
            let path = monotone_x(&points);
            if path.len() < 2 {
                warn!(series = %id, "trendline skipped (fewer than two distinct x)");
                continue;
            }
            out.push(Primitive::path(path, Style::stroke(color, 2.0), Role::Trendline).for_entity(id));
        }
        out
    }
}

pub struct ErrorBracketOverlay;

impl OverlayRenderer for ErrorBracketOverlay {
    type Scales = XyScales;
    type Row = ErrorBracket;

    fn id(&self) -> &'static str { "error_bracket" }

    fn render(&self, scales: &XyScales, rows: &[ErrorBracket], style: &OverlayStyle, theme: &Theme) -> Vec<Primitive> {
        let stroke = Style::stroke(theme.bracket, 1.5);
        let half = style.bracket_half_width_px;
        let mut out = Vec::with_capacity(rows.len() * 3);
        for bracket in rows {
            let (Some((low, high)), true) = (bracket.interval(), bracket.x.is_finite()) else {
                warn!(id = %bracket.id, "error bracket skipped (missing interval)");
                continue;
            };
            let x = scales.x.scale_clamped(bracket.x);
            let (y_low, y_high) = (scales.y.scale_clamped(low), scales.y.scale_clamped(high));
            let id = &bracket.id;
            out.push(Primitive::line(PointF::new(x, y_low), PointF::new(x, y_high), stroke, Role::BracketSpine).for_entity(id));
            for y in [y_low, y_high] {
                out.push(Primitive::line(PointF::new(x - half, y), PointF::new(x + half, y), stroke, Role::BracketCap).for_entity(id));
            }
        }
        out
    }
}
