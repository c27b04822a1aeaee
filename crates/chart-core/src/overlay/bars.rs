// File: crates/chart-core/src/overlay/bars.rs
// Summary: Grouped and stacked categorical frequency bars.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CategoryScales, OverlayRenderer};
use crate::config::OverlayStyle;
use crate::geometry::{PointF, RectF};
use crate::scale::BandScale;
use crate::scene::{Primitive, Role, Style};
use crate::series::{ordered_keys, CategoricalFrequency};
use crate::theme::{assign_colors, Theme};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarLayout {
    /// One sub-band per group key inside each category band.
    #[default]
    Grouped,
    /// Groups stacked on top of each other, in first-appearance order.
    Stacked,
}

pub struct FrequencyBarsOverlay {
    pub layout: BarLayout,
}

impl FrequencyBarsOverlay {
    pub fn new(layout: BarLayout) -> Self { Self { layout } }

    /// Largest bar top the layout will draw (per-bar count, or per-category sum when stacked).
    pub fn value_ceiling(layout: BarLayout, rows: &[CategoricalFrequency]) -> f64 {
        let valid = rows.iter().filter(|r| r.validate().is_ok());
        match layout {
            BarLayout::Grouped => valid.map(|r| r.count).fold(0.0, f64::max),
            BarLayout::Stacked => {
                let mut totals: Vec<(&str, f64)> = Vec::new();
                for r in valid {
                    match totals.iter_mut().find(|(k, _)| *k == r.category_label.as_str()) {
                        Some((_, t)) => *t += r.count,
                        None => totals.push((r.category_label.as_str(), r.count)),
                    }
                }
                totals.into_iter().map(|(_, t)| t).fold(0.0, f64::max)
            }
        }
    }
}

impl OverlayRenderer for FrequencyBarsOverlay {
    type Scales = CategoryScales;
    type Row = CategoricalFrequency;

    fn id(&self) -> &'static str { "frequency_bars" }

    fn render(&self, scales: &CategoryScales, rows: &[CategoricalFrequency], style: &OverlayStyle, theme: &Theme) -> Vec<Primitive> {
        let groups = ordered_keys(rows, |r| r.group_key.as_str());
        let colors = assign_colors(&groups, theme);
        let base = scales.y.scale_clamped(0.0);
        let mut stack_tops: Vec<(&str, f64)> = Vec::new();
        let mut out = Vec::with_capacity(rows.len());

        for row in rows {
            let id = &row.category_label;
            if let Err(err) = row.validate() {
                warn!(category = %id, group = %row.group_key, error = %err, "bar skipped");
                continue;
            }
            let Some(band) = scales.x.band(id.as_str()) else {
                warn!(category = %id, "bar has no band on the category axis");
                continue;
            };
            let gi = groups.iter().position(|g| *g == row.group_key).unwrap_or(0);
            let color = colors.get(gi).copied().unwrap_or(theme.trendline);

            let rect = match self.layout {
                BarLayout::Grouped => {
                    let inner = BandScale::new(groups.iter().copied(), (band.start, band.end()), style.group_padding);
                    let Some(slot) = inner.band_at(gi) else { continue };
                    let top = scales.y.scale_clamped(row.count);
                    RectF::from_corners(PointF::new(slot.start, top), PointF::new(slot.end(), base))
                }
                BarLayout::Stacked => {
                    let below = match stack_tops.iter_mut().find(|(k, _)| *k == id.as_str()) {
                        Some((_, t)) => {
                            let b = *t;
                            *t += row.count;
                            b
                        }
                        None => {
                            stack_tops.push((id.as_str(), row.count));
                            0.0
                        }
                    };
                    let y0 = scales.y.scale_clamped(below);
                    let y1 = scales.y.scale_clamped(below + row.count);
                    RectF::from_corners(PointF::new(band.start, y1), PointF::new(band.end(), y0))
                }
            };
            out.push(Primitive::rect(rect, Style::fill(color), Role::Bar).for_entity(id));
        }
        out
    }
}
