// File: crates/chart-core/src/axis.rs
// Summary: Axis model, "nice" tick generation (Heckbert) and tick label formatting.

use serde::{Deserialize, Serialize};

use crate::geometry::{PointF, RectF};
use crate::scale::{BandScale, LinearScale};
use crate::scene::{Primitive, Role, Style, TextAnchor};
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickFormat {
    /// `0.42 -> "42%"`
    Percent,
    /// Fixed number of decimals.
    Fixed(u8),
    Integer,
}

impl TickFormat {
    pub fn format(&self, v: f64) -> String {
        match *self {
            TickFormat::Percent => format!("{}%", (v * 100.0).round() as i64),
            TickFormat::Fixed(decimals) => format!("{:.*}", decimals as usize, v),
            TickFormat::Integer => format!("{}", v.round() as i64),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisPosition {
    Left,
    Bottom,
}

#[derive(Clone, Debug)]
pub struct Axis {
    /// Static title supplied by the caller.
    pub title: String,
    pub format: TickFormat,
    pub tick_count: usize,
}

impl Axis {
    pub fn new(title: impl Into<String>, format: TickFormat) -> Self {
        Self { title: title.into(), format, tick_count: 5 }
    }
}

/// Heckbert's nice number: 1, 2, 5 or 10 times a power of ten.
pub fn nice_num(x: f64, round: bool) -> f64 {
    if !(x.is_finite() && x > 0.0) {
        return 0.0;
    }
    let exp = x.log10().floor();
    let f = x / 10f64.powf(exp);
    let nf = if round {
        if f < 1.5 { 1.0 } else if f < 3.0 { 2.0 } else if f < 7.0 { 5.0 } else { 10.0 }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nf * 10f64.powf(exp)
}

/// About `n` tick values spaced by a nice step, all inside `[lo, hi]`.
pub fn nice_ticks(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if (hi - lo).abs() < 1e-12 {
        return vec![lo];
    }
    let n = n.max(2);
    let range = nice_num(hi - lo, false);
    let step = nice_num(range / (n - 1) as f64, true);
    if step <= 0.0 {
        return vec![lo, hi];
    }
    let decimals = (-step.log10().floor()).max(0.0) as i32 + 1;
    let snap = |v: f64| {
        let p = 10f64.powi(decimals);
        let r = (v * p).round() / p;
        if r == 0.0 { 0.0 } else { r }
    };
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    let ticks: Vec<f64> = (first..=last)
        .map(|k| snap(k as f64 * step))
        .filter(|&v| v >= lo - step * 1e-9 && v <= hi + step * 1e-9)
        .map(|v| v.clamp(lo, hi))
        .collect();
    // a narrow span can fall between two multiples of the step
    if ticks.is_empty() { vec![lo, hi] } else { ticks }
}

/// Gridlines and tick labels for a linear axis, in plot-local coordinates.
pub fn render_linear(
    axis: &Axis,
    scale: &LinearScale,
    position: AxisPosition,
    plot: &RectF,
    theme: &Theme,
) -> Vec<Primitive> {
    let (lo, hi) = scale.domain_extent();
    let ticks = nice_ticks(lo, hi, axis.tick_count);
    let mut out = Vec::with_capacity(ticks.len() * 2 + 2);
    let grid = Style::stroke(theme.grid, 1.0);
    for v in ticks {
        let px = scale.scale(v);
        let label = axis.format.format(v);
        match position {
            AxisPosition::Left => {
                out.push(Primitive::line(PointF::new(0.0, px), PointF::new(plot.width, px), grid, Role::Gridline));
                out.push(Primitive::text(PointF::new(-8.0, px + 4.0), label, 11.0, TextAnchor::End, theme.tick, Role::TickLabel));
            }
            AxisPosition::Bottom => {
                out.push(Primitive::line(PointF::new(px, 0.0), PointF::new(px, plot.height), grid, Role::Gridline));
                out.push(Primitive::text(
                    PointF::new(px, plot.height + 18.0),
                    label,
                    11.0,
                    TextAnchor::Middle,
                    theme.tick,
                    Role::TickLabel,
                ));
            }
        }
    }
    out.extend(axis_line_and_title(axis, position, plot, theme));
    out
}

/// One label per category at the band center; no nice rounding.
pub fn render_band(axis: &Axis, scale: &BandScale, plot: &RectF, theme: &Theme) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(scale.len() + 2);
    for (i, category) in scale.categories().iter().enumerate() {
        if let Some(band) = scale.band_at(i) {
            out.push(Primitive::text(
                PointF::new(band.center(), plot.height + 18.0),
                category.as_str(),
                11.0,
                TextAnchor::Middle,
                theme.tick,
                Role::TickLabel,
            ));
        }
    }
    out.extend(axis_line_and_title(axis, AxisPosition::Bottom, plot, theme));
    out
}

fn axis_line_and_title(axis: &Axis, position: AxisPosition, plot: &RectF, theme: &Theme) -> Vec<Primitive> {
    let stroke = Style::stroke(theme.axis_line, 1.5);
    let mut out = Vec::with_capacity(2);
    match position {
        AxisPosition::Left => {
            out.push(Primitive::line(PointF::new(0.0, 0.0), PointF::new(0.0, plot.height), stroke, Role::AxisLine));
            if !axis.title.is_empty() {
                out.push(Primitive::text(PointF::new(0.0, -12.0), axis.title.as_str(), 12.0, TextAnchor::Start, theme.axis_label, Role::AxisTitle));
            }
        }
        AxisPosition::Bottom => {
            out.push(Primitive::line(
                PointF::new(0.0, plot.height),
                PointF::new(plot.width, plot.height),
                stroke,
                Role::AxisLine,
            ));
            if !axis.title.is_empty() {
                out.push(Primitive::text(
                    PointF::new(plot.width * 0.5, plot.height + 40.0),
                    axis.title.as_str(),
                    12.0,
                    TextAnchor::Middle,
                    theme.axis_label,
                    Role::AxisTitle,
                ));
            }
        }
    }
    out
}
