// File: crates/demo/src/samples.rs
// Summary: Loads long-format ensemble samples (one row per plan and district) and derives chart inputs.
// Notes:
// - Districts are ranked by group share within each plan, so district `k` is the k-th least diverse.
// - Plan-level seat counts repeat on every row of a plan; the first row of each plan wins.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use ensemble_chart_core::series::{CategoricalFrequency, DensityCurve, DistributionSummary, ErrorBracket, TrendlineSeries};
use ensemble_chart_core::stats::{histogram_density, mean, quantile, split_bars, summarize, HIST_BINS, RACEBLIND, VRA};
use ensemble_chart_core::ChartInputs;
use serde::Deserialize;
use tracing::{info, warn};

/// Group-share bins used for the ensemble trendline.
const TREND_BINS: usize = 20;

#[derive(Clone, Debug, Deserialize)]
pub struct SampleRow {
    pub ensemble: String,
    pub plan: u32,
    pub district: u32,
    pub group_share: f64,
    pub dem_share: f64,
    pub dem_seats: u32,
}

pub fn load_samples(path: &Path) -> Result<Vec<SampleRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, rec) in rdr.deserialize::<SampleRow>().enumerate() {
        match rec {
            Ok(row) if row.group_share.is_finite() && row.dem_share.is_finite() => rows.push(row),
            Ok(_) => skipped += 1,
            Err(err) => {
                warn!(line = line + 2, error = %err, "sample row skipped");
                skipped += 1;
            }
        }
    }
    info!(rows = rows.len(), skipped, path = %path.display(), "samples loaded");
    Ok(rows)
}

/// Every chart input derivable from raw samples.
pub fn derive_inputs(rows: &[SampleRow]) -> ChartInputs {
    ChartInputs {
        summaries: district_summaries(rows),
        densities: group_share_densities(rows),
        trendlines: trendline(rows).into_iter().collect(),
        brackets: district_brackets(rows),
        frequencies: seat_splits(rows),
        ..ChartInputs::default()
    }
}

/// Box-plot rows from the race-blind ensemble (all rows when it is absent).
fn district_summaries(rows: &[SampleRow]) -> Vec<DistributionSummary> {
    let has_raceblind = rows.iter().any(|r| r.ensemble == RACEBLIND);
    let mut by_district: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for r in rows.iter().filter(|r| !has_raceblind || r.ensemble == RACEBLIND) {
        by_district.entry(r.district).or_default().push(r.group_share);
    }
    by_district.iter().filter_map(|(d, shares)| summarize(*d, shares)).collect()
}

fn group_share_densities(rows: &[SampleRow]) -> Vec<DensityCurve> {
    let mut by_ensemble: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in rows {
        by_ensemble.entry(r.ensemble.as_str()).or_default().push(r.group_share);
    }
    by_ensemble
        .into_iter()
        .filter_map(|(name, shares)| histogram_density(name, &shares, HIST_BINS, (0.0, 1.0)))
        .map(|est| est.curve)
        .collect()
}

/// Mean Democratic share per group-share bin, over every sampled district.
fn trendline(rows: &[SampleRow]) -> Option<TrendlineSeries> {
    let width = 1.0 / TREND_BINS as f64;
    let mut bins: Vec<Vec<f64>> = vec![Vec::new(); TREND_BINS];
    for r in rows.iter().filter(|r| (0.0..=1.0).contains(&r.group_share)) {
        let i = ((r.group_share / width) as usize).min(TREND_BINS - 1);
        bins[i].push(r.dem_share);
    }
    let points: Vec<(f64, f64)> = bins
        .iter()
        .enumerate()
        .filter_map(|(i, ys)| mean(ys).map(|m| ((i as f64 + 0.5) * width, m)))
        .collect();
    (points.len() >= 2).then(|| TrendlineSeries::new("ensemble", points))
}

/// 95% interval of Democratic share per district, placed at the district's median group share.
fn district_brackets(rows: &[SampleRow]) -> Vec<ErrorBracket> {
    let mut by_district: BTreeMap<u32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in rows {
        let e = by_district.entry(r.district).or_default();
        e.0.push(r.group_share);
        e.1.push(r.dem_share);
    }
    by_district
        .iter()
        .filter_map(|(d, (xs, ys))| {
            let x = quantile(xs, 0.5)?;
            let (lo, hi) = (quantile(ys, 0.025)?, quantile(ys, 0.975)?);
            let mut bracket = ErrorBracket::new(*d, x, lo, hi);
            bracket.estimate = quantile(ys, 0.5);
            Some(bracket)
        })
        .collect()
}

/// Seat-split frequencies for the race-blind and VRA ensembles.
fn seat_splits(rows: &[SampleRow]) -> Vec<CategoricalFrequency> {
    let num_districts = rows.iter().map(|r| r.district).collect::<BTreeSet<_>>().len() as u32;
    let mut seen: BTreeSet<(&str, u32)> = BTreeSet::new();
    let (mut raceblind, mut vra) = (BTreeMap::new(), BTreeMap::new());
    for r in rows {
        if !seen.insert((r.ensemble.as_str(), r.plan)) {
            continue;
        }
        let hist = match r.ensemble.as_str() {
            RACEBLIND => &mut raceblind,
            VRA => &mut vra,
            other => {
                warn!(ensemble = other, "unknown ensemble ignored for seat splits");
                continue;
            }
        };
        *hist.entry(r.dem_seats).or_insert(0u64) += 1;
    }
    if raceblind.is_empty() && vra.is_empty() {
        return Vec::new();
    }
    split_bars(&raceblind, &vra, num_districts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ensemble: &str, plan: u32, district: u32, group_share: f64, dem_share: f64, dem_seats: u32) -> SampleRow {
        SampleRow { ensemble: ensemble.to_string(), plan, district, group_share, dem_share, dem_seats }
    }

    fn rows() -> Vec<SampleRow> {
        vec![
            row("raceblind", 0, 1, 0.10, 0.30, 1),
            row("raceblind", 0, 2, 0.60, 0.70, 1),
            row("raceblind", 1, 1, 0.20, 0.35, 0),
            row("raceblind", 1, 2, 0.50, 0.48, 0),
            row("vra", 0, 1, 0.15, 0.32, 1),
            row("vra", 0, 2, 0.65, 0.72, 1),
        ]
    }

    #[test]
    fn derives_every_chart_input() {
        let inputs = derive_inputs(&rows());
        // box plot uses the race-blind rows only
        assert_eq!(inputs.summaries.len(), 2);
        assert_eq!(inputs.summaries[0].category_id.as_str(), "1");
        assert!((inputs.summaries[0].median - 0.15).abs() < 1e-12);
        assert_eq!(inputs.densities.len(), 2);
        assert_eq!(inputs.trendlines.len(), 1);
        assert_eq!(inputs.brackets.len(), 2);
        assert!(inputs.brackets.iter().all(|b| b.interval().is_some()));
    }

    #[test]
    fn seat_splits_count_each_plan_once() {
        let bars = seat_splits(&rows());
        let rb: Vec<(String, f64)> = bars
            .iter()
            .filter(|b| b.group_key == RACEBLIND)
            .map(|b| (b.category_label.to_string(), b.count))
            .collect();
        assert_eq!(rb, vec![("R2/D0".to_string(), 1.0), ("R1/D1".to_string(), 1.0)]);
        let vra_total: f64 = bars.iter().filter(|b| b.group_key == VRA).map(|b| b.count).sum();
        assert_eq!(vra_total, 1.0);
    }
}
