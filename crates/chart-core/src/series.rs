// File: crates/chart-core/src/series.rs
// Summary: View models consumed per render: distributions, references, density curves, trendlines, frequencies.
// Notes:
// - All rows are immutable and rebuilt from upstream data on every render.
// - Field names follow the camelCase JSON emitted by the data layer.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::EntityId;

/// Box-and-whisker row for one category (district rank, plan bucket...).
///
/// `q1`, `median`, `q3` are required for the box; the whisker ends and the
/// mean are optional so a partial row still renders its box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub category_id: EntityId,
    #[serde(default)]
    pub min: Option<f64>,
    pub q1: f64,
    pub median: f64,
    #[serde(default)]
    pub mean: Option<f64>,
    pub q3: f64,
    #[serde(default)]
    pub max: Option<f64>,
}

impl DistributionSummary {
    pub fn new(category_id: impl Into<EntityId>, min: f64, q1: f64, median: f64, mean: f64, q3: f64, max: f64) -> Self {
        Self {
            category_id: category_id.into(),
            min: Some(min),
            q1,
            median,
            mean: Some(mean),
            q3,
            max: Some(max),
        }
    }

    /// Check `min <= q1 <= median <= q3 <= max` and `min <= mean <= max` over present fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        let entity = &self.category_id;
        let finite = |field: &'static str, v: f64| {
            if v.is_finite() { Ok(()) } else { Err(ModelError::NonFinite { entity: entity.clone(), field }) }
        };
        finite("q1", self.q1)?;
        finite("median", self.median)?;
        finite("q3", self.q3)?;
        for (field, v) in [("min", self.min), ("mean", self.mean), ("max", self.max)] {
            if let Some(v) = v {
                finite(field, v)?;
            }
        }

        let order_err = |detail: String| ModelError::QuartileOrder { entity: entity.clone(), detail };
        if self.q1 > self.median || self.median > self.q3 {
            return Err(order_err(format!("q1={} median={} q3={}", self.q1, self.median, self.q3)));
        }
        if let Some(min) = self.min {
            if min > self.q1 {
                return Err(order_err(format!("min={} > q1={}", min, self.q1)));
            }
        }
        if let Some(max) = self.max {
            if max < self.q3 {
                return Err(order_err(format!("max={} < q3={}", max, self.q3)));
            }
        }
        if let Some(mean) = self.mean {
            let lo = self.min.unwrap_or(f64::NEG_INFINITY);
            let hi = self.max.unwrap_or(f64::INFINITY);
            if mean < lo || mean > hi {
                return Err(ModelError::MeanOutOfRange { entity: entity.clone(), mean, min: lo, max: hi });
            }
        }
        Ok(())
    }

    /// Largest value the row draws (whisker end or upper quartile).
    pub fn upper(&self) -> f64 { self.max.unwrap_or(self.q3) }
}

/// External marker (e.g. the enacted plan) overlaid on one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePoint {
    pub category_id: EntityId,
    pub value: f64,
}

impl ReferencePoint {
    pub fn new(category_id: impl Into<EntityId>, value: f64) -> Self {
        Self { category_id: category_id.into(), value }
    }
}

/// Sampled density curve with an optional confidence interval on the x-axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityCurve {
    pub series_id: EntityId,
    pub samples: Vec<(f64, f64)>,
    #[serde(default)]
    pub ci_low: Option<f64>,
    #[serde(default)]
    pub ci_high: Option<f64>,
}

impl DensityCurve {
    pub fn new(series_id: impl Into<EntityId>, samples: Vec<(f64, f64)>) -> Self {
        Self { series_id: series_id.into(), samples, ci_low: None, ci_high: None }
    }

    pub fn with_ci(mut self, low: f64, high: f64) -> Self {
        self.ci_low = Some(low);
        self.ci_high = Some(high);
        self
    }

    /// Strictly increasing x, non-negative finite y.
    pub fn validate_samples(&self) -> Result<(), ModelError> {
        let entity = &self.series_id;
        if self.samples.len() < 2 {
            return Err(ModelError::TooFewSamples { entity: entity.clone(), count: self.samples.len() });
        }
        for (i, &(x, y)) in self.samples.iter().enumerate() {
            if !x.is_finite() {
                return Err(ModelError::NonFinite { entity: entity.clone(), field: "x" });
            }
            if !y.is_finite() {
                return Err(ModelError::NonFinite { entity: entity.clone(), field: "y" });
            }
            if y < 0.0 {
                return Err(ModelError::NegativeDensity { entity: entity.clone(), index: i, y });
            }
            if i > 0 && x <= self.samples[i - 1].0 {
                return Err(ModelError::NonIncreasingX { entity: entity.clone(), index: i });
            }
        }
        Ok(())
    }

    /// The confidence interval when both bounds are present, ordered and inside the x-domain.
    pub fn interval(&self) -> Result<Option<(f64, f64)>, ModelError> {
        let (low, high) = match (self.ci_low, self.ci_high) {
            (Some(l), Some(h)) => (l, h),
            _ => return Ok(None),
        };
        let entity = &self.series_id;
        if !low.is_finite() || !high.is_finite() {
            return Err(ModelError::NonFinite { entity: entity.clone(), field: "ci" });
        }
        if low > high {
            return Err(ModelError::InvertedInterval { entity: entity.clone(), low, high });
        }
        if let Some((min, max)) = self.x_extent() {
            if low < min || high > max {
                return Err(ModelError::IntervalOutsideDomain { entity: entity.clone(), low, high, min, max });
            }
        }
        Ok(Some((low, high)))
    }

    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.0, last.0))
    }

    pub fn peak(&self) -> Option<(f64, f64)> {
        self.samples.iter().copied().filter(|(_, y)| y.is_finite()).fold(None, |best, p| match best {
            Some((_, by)) if by >= p.1 => best,
            _ => Some(p),
        })
    }
}

/// Monotone-smoothed trend over points in the unit square.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendlineSeries {
    pub series_id: EntityId,
    pub points: Vec<(f64, f64)>,
}

impl TrendlineSeries {
    pub fn new(series_id: impl Into<EntityId>, points: Vec<(f64, f64)>) -> Self {
        Self { series_id: series_id.into(), points }
    }

    /// Reduce to at most `max_points` with LTTB, keeping the overall shape.
    pub fn downsample(&self, max_points: usize) -> Self {
        use crate::downsample::lttb;
        let points = if self.points.len() > max_points && max_points >= 3 {
            lttb(&self.points, max_points)
        } else {
            self.points.clone()
        };
        Self { series_id: self.series_id.clone(), points }
    }
}

/// Vertical error bracket at `x` spanning `[ciLow, ciHigh]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBracket {
    pub id: EntityId,
    pub x: f64,
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub ci_low: Option<f64>,
    #[serde(default)]
    pub ci_high: Option<f64>,
}

impl ErrorBracket {
    pub fn new(id: impl Into<EntityId>, x: f64, ci_low: f64, ci_high: f64) -> Self {
        Self { id: id.into(), x, estimate: None, ci_low: Some(ci_low), ci_high: Some(ci_high) }
    }

    /// Ordered interval when both ends are present and finite.
    pub fn interval(&self) -> Option<(f64, f64)> {
        match (self.ci_low, self.ci_high) {
            (Some(l), Some(h)) if l.is_finite() && h.is_finite() => Some((l.min(h), l.max(h))),
            _ => None,
        }
    }

    /// Point used for hover hit testing: the estimate, or the interval midpoint.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        if !self.x.is_finite() {
            return None;
        }
        match (self.estimate.filter(|e| e.is_finite()), self.interval()) {
            (Some(e), _) => Some((self.x, e)),
            (None, Some((l, h))) => Some((self.x, (l + h) * 0.5)),
            _ => None,
        }
    }
}

/// One bar of a grouped/stacked frequency chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalFrequency {
    pub category_label: EntityId,
    pub count: f64,
    pub group_key: String,
}

impl CategoricalFrequency {
    pub fn new(category_label: impl Into<EntityId>, count: f64, group_key: impl Into<String>) -> Self {
        Self { category_label: category_label.into(), count, group_key: group_key.into() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.count.is_finite() || self.count < 0.0 {
            return Err(ModelError::NegativeCount { entity: self.category_label.clone(), count: self.count });
        }
        Ok(())
    }
}

/// First-appearance order of the distinct values produced by `key`.
pub(crate) fn ordered_keys<'a, T, F>(rows: &'a [T], key: F) -> Vec<&'a str>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut out: Vec<&str> = Vec::new();
    for row in rows {
        let k = key(row);
        if !out.contains(&k) {
            out.push(k);
        }
    }
    out
}
