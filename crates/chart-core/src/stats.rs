// File: crates/chart-core/src/stats.rs
// Summary: Summaries built from raw ensemble/posterior samples (quantiles, histogram density, seat splits).
// Notes:
// - Quantiles use linear interpolation between order statistics (numpy's default method).
// - Non-finite samples are dropped before any statistic is computed.

use std::collections::BTreeMap;

use crate::grid::{centers, linspace};
use crate::series::{CategoricalFrequency, DensityCurve, DistributionSummary};
use crate::types::EntityId;

/// Default number of histogram bins for posterior densities.
pub const HIST_BINS: usize = 60;

fn finite_sorted(samples: &[f64]) -> Vec<f64> {
    let mut v: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// `q`-quantile of already sorted finite values.
fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !q.is_finite() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// `q`-quantile (`q` in [0, 1]) with linear interpolation; `None` without finite samples.
pub fn quantile(samples: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&finite_sorted(samples), q)
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    let (sum, n) = samples.iter().filter(|x| x.is_finite()).fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Five-number summary plus mean for one category; `None` without finite samples.
pub fn summarize(category: impl Into<EntityId>, samples: &[f64]) -> Option<DistributionSummary> {
    let sorted = finite_sorted(samples);
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    let q = |p: f64| quantile_sorted(&sorted, p);
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    Some(DistributionSummary {
        category_id: category.into(),
        min: Some(first),
        q1: q(0.25)?,
        median: q(0.5)?,
        // clamp guards against summation drift on constant samples
        mean: Some(mean.clamp(first, last)),
        q3: q(0.75)?,
        max: Some(last),
    })
}

/// Histogram density of a sample set plus its 95% interval and peak.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityEstimate {
    pub curve: DensityCurve,
    pub peak_x: f64,
    pub peak_y: f64,
}

/// Histogram with `bins` equal bins over `range`, normalized so the area is 1.
///
/// Samples outside `range` are ignored; the last bin includes its right edge.
/// The curve is sampled at bin centers and carries the 2.5%/97.5% quantiles
/// of all finite samples as its interval. `None` when no sample falls in range.
pub fn histogram_density(series: impl Into<EntityId>, samples: &[f64], bins: usize, range: (f64, f64)) -> Option<DensityEstimate> {
    let (lo, hi) = range;
    if bins == 0 || !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return None;
    }
    let sorted = finite_sorted(samples);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &x in sorted.iter().filter(|&&x| x >= lo && x <= hi) {
        let i = (((x - lo) / width) as usize).min(bins - 1);
        counts[i] += 1;
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return None;
    }

    let xs = centers(&linspace(lo, hi, bins + 1));
    let norm = total as f64 * width;
    let samples: Vec<(f64, f64)> = xs.into_iter().zip(&counts).map(|(x, &c)| (x, c as f64 / norm)).collect();
    let (peak_x, peak_y) = samples
        .iter()
        .copied()
        .fold((lo, f64::NEG_INFINITY), |best, p| if p.1 > best.1 { p } else { best });

    let mut curve = DensityCurve::new(series, samples);
    if let (Some(ci_low), Some(ci_high)) = (quantile_sorted(&sorted, 0.025), quantile_sorted(&sorted, 0.975)) {
        // keep the interval inside the sampled x-range so the band stays drawable
        if let Some((x0, x1)) = curve.x_extent() {
            curve = curve.with_ci(ci_low.clamp(x0, x1), ci_high.clamp(x0, x1));
        }
    }
    Some(DensityEstimate { curve, peak_x, peak_y })
}

/// `"R{rep}/D{dem}"` label for a seat split.
pub fn seat_split_label(dem_seats: u32, num_districts: u32) -> String {
    format!("R{}/D{}", num_districts.saturating_sub(dem_seats), dem_seats)
}

pub const RACEBLIND: &str = "raceblind";
pub const VRA: &str = "vra";

/// Seat-split bars comparing two ensembles (histograms keyed by Democratic seats).
///
/// One row per (split, ensemble), splits ordered by Democratic seat count; an
/// ensemble missing a split contributes a zero-height bar.
pub fn split_bars(raceblind: &BTreeMap<u32, u64>, vra: &BTreeMap<u32, u64>, num_districts: u32) -> Vec<CategoricalFrequency> {
    let mut dem_bins: Vec<u32> = raceblind.keys().chain(vra.keys()).copied().collect();
    dem_bins.sort_unstable();
    dem_bins.dedup();

    let mut out = Vec::with_capacity(dem_bins.len() * 2);
    for d in dem_bins {
        let label = seat_split_label(d, num_districts);
        for (group, hist) in [(RACEBLIND, raceblind), (VRA, vra)] {
            let count = hist.get(&d).copied().unwrap_or(0);
            out.push(CategoricalFrequency::new(label.as_str(), count as f64, group));
        }
    }
    out
}
