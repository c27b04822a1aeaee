// File: crates/chart-core/src/shared.rs
// Summary: Shared scale ceiling across sibling charts so independently rendered charts stay comparable.

use tracing::debug;

use crate::config::SharedScaleOptions;

/// Resolved value domain of one chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharedDomain {
    pub min: f64,
    pub max: f64,
}

impl SharedDomain {
    /// Domain `[min, ceiling]` where the ceiling is the shared override when present.
    pub fn resolve(min: f64, local_max: f64, shared_max: Option<f64>) -> Self {
        let max = shared_max.filter(|m| m.is_finite()).unwrap_or(local_max);
        Self { min, max }
    }

    pub fn as_tuple(&self) -> (f64, f64) { (self.min, self.max) }
}

/// Common upper bound for every contributing dataset.
///
/// Max over all finite values, padded by `(1 + padding_fraction)`, rounded up
/// to the next multiple of `snap_step` (`snap_step <= 0` disables snapping).
/// Returns `default` when no dataset has a positive finite value.
/// The result is never below the true maximum.
pub fn compute_shared_max<D: AsRef<[f64]>>(datasets: &[D], padding_fraction: f64, snap_step: f64, default: f64) -> f64 {
    let max = datasets
        .iter()
        .flat_map(|d| d.as_ref().iter().copied())
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return default;
    }
    let padded = max * (1.0 + padding_fraction.max(0.0));
    if !(snap_step > 0.0 && snap_step.is_finite()) {
        return padded;
    }
    // relative epsilon keeps 671.0000000000001 from reading as just above a multiple boundary
    let steps = padded / snap_step;
    let mut snapped = (steps - steps.abs() * 1e-12).ceil() * snap_step;
    if snapped < max {
        snapped += snap_step;
    }
    snapped
}

/// Recomputes the shared ceiling only when the contributing datasets change.
#[derive(Clone, Debug, Default)]
pub struct SharedScaleCoordinator {
    options: SharedScaleOptions,
    last_inputs: Vec<Vec<f64>>,
    last_max: Option<f64>,
}

impl SharedScaleCoordinator {
    pub fn new(options: SharedScaleOptions) -> Self {
        Self { options, last_inputs: Vec::new(), last_max: None }
    }

    pub fn options(&self) -> SharedScaleOptions { self.options }

    pub fn shared_max<D: AsRef<[f64]>>(&mut self, datasets: &[D]) -> f64 {
        let unchanged = self.last_max.is_some()
            && self.last_inputs.len() == datasets.len()
            && self.last_inputs.iter().zip(datasets).all(|(a, b)| a.as_slice() == b.as_ref());
        if let (true, Some(max)) = (unchanged, self.last_max) {
            return max;
        }
        let o = self.options;
        let max = compute_shared_max(datasets, o.padding_fraction, o.snap_step, o.default_max);
        debug!(datasets = datasets.len(), max, "shared scale recomputed");
        self.last_inputs = datasets.iter().map(|d| d.as_ref().to_vec()).collect();
        self.last_max = Some(max);
        max
    }
}
