// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and the scene pipeline (scales, axes, overlays, highlight, legend, tooltip).
// Notes:
// - Geometry is computed in plot-local pixels; layers carry the plot origin as their translation.
// - Empty inputs or a plot area with no room render the placeholder scene only.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{render_band, render_linear, Axis, AxisPosition, TickFormat};
use crate::config::RenderOptions;
use crate::container::plot_area;
use crate::error::Result;
use crate::geometry::{PointF, RectF, SizeF};
use crate::interaction::{place_tooltip, tooltip_primitives, HitTarget, Hover, InteractionLayer};
use crate::overlay::{
    BarLayout, BoxPlotRow, BoxWhiskerOverlay, CategoryScales, DensityOverlay, ErrorBracketOverlay, FrequencyBarsOverlay,
    OverlayRenderer, TrendlineOverlay, XyScales,
};
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Layer, Primitive, Rgba, Role, Scene, Style, TextAnchor};
use crate::series::{
    ordered_keys, CategoricalFrequency, DensityCurve, DistributionSummary, ErrorBracket, ReferencePoint, TrendlineSeries,
};
use crate::shared::{compute_shared_max, SharedDomain};
use crate::theme::{assign_colors, Theme};
use crate::types::EntityId;

/// View models consumed by one render, as produced by the data layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartInputs {
    pub summaries: Vec<DistributionSummary>,
    pub references: Option<Vec<ReferencePoint>>,
    pub densities: Vec<DensityCurve>,
    pub trendlines: Vec<TrendlineSeries>,
    pub brackets: Vec<ErrorBracket>,
    pub frequencies: Vec<CategoricalFrequency>,
    /// Ceiling shared with sibling charts; overrides the locally computed one.
    pub shared_domain_max: Option<f64>,
}

impl ChartInputs {
    pub fn from_json_str(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn references(&self) -> &[ReferencePoint] { self.references.as_deref().unwrap_or(&[]) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    BoxPlot,
    Density,
    Trend,
    Frequency(BarLayout),
}

impl ChartKind {
    fn default_axes(self) -> (Axis, Axis) {
        match self {
            ChartKind::BoxPlot => (Axis::new("District", TickFormat::Integer), Axis::new("Group population share", TickFormat::Percent)),
            ChartKind::Density => (Axis::new("Vote share", TickFormat::Percent), Axis::new("Density", TickFormat::Fixed(1))),
            ChartKind::Trend => (Axis::new("Group share", TickFormat::Percent), Axis::new("Vote share", TickFormat::Percent)),
            ChartKind::Frequency(_) => (Axis::new("Seat split", TickFormat::Integer), Axis::new("Plans", TickFormat::Integer)),
        }
    }

    /// Fraction charts keep a `[0, 1]` value axis unless the data exceeds it.
    fn is_fraction(self) -> bool { matches!(self, ChartKind::BoxPlot | ChartKind::Trend) }
}

pub struct Chart {
    pub kind: ChartKind,
    pub inputs: ChartInputs,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Legend labels, paired in order with the chart's series colors; empty hides the legend.
    pub legend: Vec<String>,
}

impl Chart {
    pub fn new(kind: ChartKind, inputs: ChartInputs) -> Self {
        let (x_axis, y_axis) = kind.default_axes();
        Self { kind, inputs, x_axis, y_axis, legend: Vec::new() }
    }

    pub fn with_axes(mut self, x_axis: Axis, y_axis: Axis) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub fn with_legend<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legend = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        let i = &self.inputs;
        match self.kind {
            ChartKind::BoxPlot => i.summaries.is_empty(),
            ChartKind::Density => i.densities.is_empty(),
            ChartKind::Trend => i.trendlines.is_empty() && i.brackets.is_empty(),
            ChartKind::Frequency(_) => i.frequencies.is_empty(),
        }
    }

    /// Values this chart contributes to a shared ceiling.
    pub fn values(&self) -> Vec<f64> {
        let i = &self.inputs;
        match self.kind {
            ChartKind::BoxPlot => i
                .summaries
                .iter()
                .flat_map(|s| [Some(s.upper()), s.mean])
                .flatten()
                .chain(i.references().iter().map(|r| r.value))
                .collect(),
            ChartKind::Density => i.densities.iter().flat_map(|c| c.samples.iter().map(|p| p.1)).collect(),
            ChartKind::Trend => i
                .trendlines
                .iter()
                .flat_map(|t| t.points.iter().map(|p| p.1))
                .chain(i.brackets.iter().filter_map(|b| b.interval().map(|(_, hi)| hi)))
                .collect(),
            ChartKind::Frequency(layout) => vec![FrequencyBarsOverlay::value_ceiling(layout, &i.frequencies)],
        }
    }

    /// Value-axis domain: the shared ceiling when supplied, otherwise this chart's own.
    pub fn value_domain(&self, opts: &RenderOptions) -> SharedDomain {
        let values = self.values();
        let s = opts.shared;
        let local = if self.kind.is_fraction() && values.iter().all(|v| !v.is_finite() || *v <= 1.0) {
            1.0
        } else {
            compute_shared_max(&[values], s.padding_fraction, s.snap_step, s.default_max)
        };
        SharedDomain::resolve(0.0, local, self.inputs.shared_domain_max)
    }

    fn x_domain(&self) -> (f64, f64) {
        match self.kind {
            ChartKind::Density => self
                .inputs
                .densities
                .iter()
                .filter_map(DensityCurve::x_extent)
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .fold(None, |acc: Option<(f64, f64)>, (a, b)| match acc {
                    Some((lo, hi)) => Some((lo.min(a), hi.max(b))),
                    None => Some((a, b)),
                })
                .unwrap_or((0.0, 1.0)),
            _ => (0.0, 1.0),
        }
    }

    fn categories(&self) -> Vec<&str> {
        match self.kind {
            ChartKind::Frequency(_) => ordered_keys(&self.inputs.frequencies, |f| f.category_label.as_str()),
            _ => ordered_keys(&self.inputs.summaries, |s| s.category_id.as_str()),
        }
    }

    fn category_scales(&self, plot: &RectF, opts: &RenderOptions) -> CategoryScales {
        let (lo, hi) = self.value_domain(opts).as_tuple();
        CategoryScales {
            x: BandScale::new(self.categories(), (0.0, plot.width), opts.overlay.band_padding),
            y: LinearScale::new((lo, hi), (plot.height, 0.0)),
        }
    }

    fn xy_scales(&self, plot: &RectF, opts: &RenderOptions) -> XyScales {
        let (lo, hi) = self.value_domain(opts).as_tuple();
        XyScales { x: LinearScale::new(self.x_domain(), (0.0, plot.width)), y: LinearScale::new((lo, hi), (plot.height, 0.0)) }
    }

    /// Build the full scene for `opts`; `selected` gets a highlight.
    pub fn build_scene(&self, opts: &RenderOptions, selected: Option<&EntityId>) -> Scene {
        let theme = opts.theme();
        let size = opts.size();
        if self.is_empty() {
            debug!(kind = ?self.kind, "no data; placeholder scene");
            return Scene::placeholder(size.width, size.height, theme.background, theme.placeholder, "No data available");
        }
        let Some(plot) = plot_area(size, &opts.insets) else {
            debug!(kind = ?self.kind, width = size.width, height = size.height, "no room for plot; placeholder scene");
            return Scene::placeholder(size.width, size.height, theme.background, theme.placeholder, "");
        };

        let origin = PointF::new(plot.left, plot.top);
        let mut axes = Layer::new("axes", origin);
        let mut highlight = Layer::new("highlight", origin);
        let mut overlay = Layer::new("overlay", origin);
        let x_axis = Axis { tick_count: opts.tick_count, ..self.x_axis.clone() };
        let y_axis = Axis { tick_count: opts.tick_count, ..self.y_axis.clone() };
        let style = &opts.overlay;

        match self.kind {
            ChartKind::BoxPlot | ChartKind::Frequency(_) => {
                let scales = self.category_scales(&plot, opts);
                axes.items.extend(render_linear(&y_axis, &scales.y, AxisPosition::Left, &plot, &theme));
                axes.items.extend(render_band(&x_axis, &scales.x, &plot, &theme));
                if let Some((id, rect)) = selected.and_then(|id| column_rect(&scales.x, id, plot.height).map(|r| (id, r))) {
                    highlight.items.push(Primitive::rect(rect, Style::fill(theme.highlight), Role::Highlight).for_entity(id));
                }
                overlay.items = match self.kind {
                    ChartKind::Frequency(layout) => {
                        FrequencyBarsOverlay::new(layout).render(&scales, &self.inputs.frequencies, style, &theme)
                    }
                    _ => {
                        let rows = BoxPlotRow::join(&self.inputs.summaries, self.inputs.references());
                        BoxWhiskerOverlay.render(&scales, &rows, style, &theme)
                    }
                };
            }
            ChartKind::Density | ChartKind::Trend => {
                let scales = self.xy_scales(&plot, opts);
                axes.items.extend(render_linear(&y_axis, &scales.y, AxisPosition::Left, &plot, &theme));
                axes.items.extend(render_linear(&x_axis, &scales.x, AxisPosition::Bottom, &plot, &theme));
                overlay.items = if self.kind == ChartKind::Density {
                    DensityOverlay.render(&scales, &self.inputs.densities, style, &theme)
                } else {
                    let mut items = TrendlineOverlay.render(&scales, &self.inputs.trendlines, style, &theme);
                    items.extend(ErrorBracketOverlay.render(&scales, &self.inputs.brackets, style, &theme));
                    items
                };
                if let Some(id) = selected {
                    highlight.items.extend(emphasis(&overlay.items, id, theme.highlight));
                }
            }
        }

        if !opts.draw_labels {
            axes.items.retain(|p| !matches!(p.role, Role::TickLabel | Role::AxisTitle));
        }

        let mut scene = Scene::new(size.width, size.height, theme.background);
        scene.push_layer(axes);
        scene.push_layer(highlight);
        scene.push_layer(overlay);
        if opts.draw_labels {
            scene.push_layer(self.legend_layer(&plot, &theme));
        }
        debug!(kind = ?self.kind, layers = scene.layers.len(), "scene built");
        scene
    }

    /// Series keys and colors, matching the overlays' color assignment.
    pub fn legend_colors(&self, theme: &Theme) -> Vec<Rgba> {
        let i = &self.inputs;
        match self.kind {
            ChartKind::BoxPlot => vec![theme.mean_marker, theme.reference_marker],
            ChartKind::Density => {
                let ids: Vec<&str> = i.densities.iter().map(|c| c.series_id.as_str()).collect();
                assign_colors(&ids, theme)
            }
            ChartKind::Trend if i.trendlines.len() <= 1 => vec![theme.trendline, theme.bracket],
            ChartKind::Trend => {
                let ids: Vec<&str> = i.trendlines.iter().map(|t| t.series_id.as_str()).collect();
                assign_colors(&ids, theme)
            }
            ChartKind::Frequency(_) => assign_colors(&ordered_keys(&i.frequencies, |f| f.group_key.as_str()), theme),
        }
    }

    /// Swatch + label per legend entry, right-aligned in the band above the plot.
    fn legend_layer(&self, plot: &RectF, theme: &Theme) -> Layer {
        const ENTRY: f32 = 120.0;
        let mut layer = Layer::new("legend", PointF::new(plot.left, plot.top));
        let colors = self.legend_colors(theme);
        let n = self.legend.len().min(colors.len());
        let start = plot.width - ENTRY * n as f32;
        for (i, (label, color)) in self.legend.iter().zip(colors).take(n).enumerate() {
            let x = start + ENTRY * i as f32;
            let swatch = RectF::from_ltwh(x, -22.0, 10.0, 10.0);
            layer.items.push(Primitive::rect(swatch, Style::fill(color), Role::LegendSwatch));
            layer.items.push(Primitive::text(
                PointF::new(x + 14.0, -13.0),
                label.as_str(),
                11.0,
                TextAnchor::Start,
                theme.axis_label,
                Role::LegendLabel,
            ));
        }
        layer
    }

    /// What the pointer can hit, in plot-local pixels.
    pub fn hit_target(&self, opts: &RenderOptions) -> Option<HitTarget> {
        let plot = plot_area(opts.size(), &opts.insets)?;
        if self.is_empty() {
            return None;
        }
        Some(match self.kind {
            ChartKind::BoxPlot | ChartKind::Frequency(_) => HitTarget::Bands(self.category_scales(&plot, opts).x),
            ChartKind::Density => {
                let s = self.xy_scales(&plot, opts);
                let points = self
                    .inputs
                    .densities
                    .iter()
                    .flat_map(|c| c.samples.iter().map(move |&(x, y)| (c.series_id.clone(), (x, y))))
                    .map(|(id, (x, y))| (id, PointF::new(s.x.scale(x), s.y.scale_clamped(y))))
                    .collect();
                HitTarget::Points(points)
            }
            ChartKind::Trend => {
                let s = self.xy_scales(&plot, opts);
                let to_px = |(x, y): (f64, f64)| PointF::new(s.x.scale(x), s.y.scale_clamped(y));
                let mut points: Vec<(EntityId, PointF)> = self
                    .inputs
                    .trendlines
                    .iter()
                    .flat_map(|t| t.points.iter().map(move |&p| (t.series_id.clone(), p)))
                    .map(|(id, p)| (id, to_px(p)))
                    .collect();
                points.extend(self.inputs.brackets.iter().filter_map(|b| b.anchor().map(|p| (b.id.clone(), to_px(p)))));
                HitTarget::Points(points)
            }
        })
    }

    /// Interaction layer positioned over this chart's plot area.
    pub fn interaction_layer(&self, opts: &RenderOptions) -> Option<InteractionLayer> {
        let plot = plot_area(opts.size(), &opts.insets)?;
        let target = self.hit_target(opts)?;
        Some(InteractionLayer::new(plot, target, opts.interaction.hit_radius_px))
    }

    /// Tooltip text for one entity.
    pub fn tooltip_lines(&self, id: &EntityId) -> Vec<String> {
        let i = &self.inputs;
        let pct = TickFormat::Percent;
        match self.kind {
            ChartKind::BoxPlot => {
                let Some(s) = i.summaries.iter().find(|s| &s.category_id == id) else { return Vec::new() };
                let mut lines = vec![format!("District {id}"), format!("Median {}", pct.format(s.median))];
                lines.push(format!("IQR {} to {}", pct.format(s.q1), pct.format(s.q3)));
                if let Some(r) = i.references().iter().find(|r| &r.category_id == id) {
                    lines.push(format!("Enacted {}", pct.format(r.value)));
                }
                lines
            }
            ChartKind::Density => {
                let Some(c) = i.densities.iter().find(|c| &c.series_id == id) else { return Vec::new() };
                let mut lines = vec![id.to_string()];
                if let Some((x, _)) = c.peak() {
                    lines.push(format!("Peak {}", pct.format(x)));
                }
                if let Ok(Some((lo, hi))) = c.interval() {
                    lines.push(format!("95% CI {} to {}", pct.format(lo), pct.format(hi)));
                }
                lines
            }
            ChartKind::Trend => match i.brackets.iter().find(|b| &b.id == id) {
                Some(b) => {
                    let mut lines = vec![id.to_string()];
                    if let Some((lo, hi)) = b.interval() {
                        lines.push(format!("CI {} to {}", pct.format(lo), pct.format(hi)));
                    }
                    lines
                }
                None => vec![id.to_string()],
            },
            ChartKind::Frequency(_) => i
                .frequencies
                .iter()
                .filter(|f| &f.category_label == id)
                .map(|f| format!("{}: {}", f.group_key, f.count))
                .fold(vec![id.to_string()], |mut acc, l| {
                    acc.push(l);
                    acc
                }),
        }
    }

    /// Add a tooltip layer for `hover` (plot-local pointer) on top of `scene`.
    pub fn push_tooltip(&self, scene: &mut Scene, hover: &Hover, opts: &RenderOptions) {
        let Some(plot) = plot_area(opts.size(), &opts.insets) else { return };
        let ui = opts.interaction;
        let pointer = hover.pointer.offset(plot.left, plot.top);
        let rect = place_tooltip(pointer, SizeF::new(ui.tooltip_width, ui.tooltip_height), opts.size(), ui.tooltip_offset);
        let mut layer = Layer::new("tooltip", PointF::default());
        layer.items = tooltip_primitives(rect, &self.tooltip_lines(&hover.entity), &opts.theme());
        scene.push_layer(layer);
    }
}

/// Full-height column over the selected category band.
fn column_rect(scale: &BandScale, id: &EntityId, height: f32) -> Option<RectF> {
    let band = scale.band(id.as_str())?;
    let pad = scale.gap() * 0.5;
    Some(RectF::from_ltwh(band.start - pad, 0.0, band.width + 2.0 * pad, height))
}

/// Wide translucent strokes under the selected series' lines.
fn emphasis(items: &[Primitive], id: &EntityId, color: Rgba) -> Vec<Primitive> {
    items
        .iter()
        .filter(|p| p.entity.as_ref() == Some(id) && matches!(p.role, Role::DensityLine | Role::Trendline | Role::BracketSpine))
        .map(|p| {
            let mut halo = p.clone();
            halo.style = Style::stroke(color, p.style.stroke_width + 6.0);
            halo.role = Role::Highlight;
            halo
        })
        .collect()
}
