// File: crates/chart-core/tests/shared.rs
// Purpose: Shared ceiling computation across sibling charts and coordinator caching.

use ensemble_chart_core::config::SharedScaleOptions;
use ensemble_chart_core::shared::{compute_shared_max, SharedDomain, SharedScaleCoordinator};

#[test]
fn sibling_maxima_snap_to_common_ceiling() {
    let a = vec![120.0, 420.0];
    let b = vec![610.0, 15.0];
    assert_eq!(compute_shared_max(&[a, b], 0.1, 100.0, 1.0), 700.0);
}

#[test]
fn exact_multiple_is_not_bumped_by_float_noise() {
    // 0.1 * 3.0 is 0.30000000000000004, a hair above the third multiple
    let got = compute_shared_max(&[vec![0.1 * 3.0]], 0.0, 0.1, 1.0);
    assert!((got - 0.3).abs() < 1e-9, "got {got}");
}

#[test]
fn never_below_true_max() {
    for (vals, pad, snap) in [(vec![0.95], 0.0, 0.1), (vec![3.3], 0.05, 0.5), (vec![1e-3], 0.0, 0.25)] {
        let max = vals.iter().copied().fold(f64::MIN, f64::max);
        assert!(compute_shared_max(&[vals], pad, snap, 1.0) >= max);
    }
}

#[test]
fn empty_and_non_positive_inputs_use_default() {
    let none: [Vec<f64>; 0] = [];
    assert_eq!(compute_shared_max(&none, 0.1, 100.0, 1.0), 1.0);
    assert_eq!(compute_shared_max(&[Vec::<f64>::new()], 0.1, 100.0, 5.0), 5.0);
    assert_eq!(compute_shared_max(&[vec![f64::NAN, 0.0]], 0.1, 100.0, 5.0), 5.0);
}

#[test]
fn zero_snap_only_pads() {
    let got = compute_shared_max(&[vec![10.0]], 0.5, 0.0, 1.0);
    assert!((got - 15.0).abs() < 1e-12);
}

#[test]
fn coordinator_recomputes_only_on_change() {
    let mut c = SharedScaleCoordinator::new(SharedScaleOptions { padding_fraction: 0.1, snap_step: 100.0, default_max: 1.0 });
    let first = c.shared_max(&[vec![420.0], vec![610.0]]);
    let again = c.shared_max(&[vec![420.0], vec![610.0]]);
    assert_eq!(first, 700.0);
    assert_eq!(first, again);
    assert_eq!(c.shared_max(&[vec![420.0], vec![910.0]]), 1100.0);
}

#[test]
fn shared_override_wins_over_local_max() {
    assert_eq!(SharedDomain::resolve(0.0, 0.6, Some(0.9)).as_tuple(), (0.0, 0.9));
    assert_eq!(SharedDomain::resolve(0.0, 0.6, None).as_tuple(), (0.0, 0.6));
    assert_eq!(SharedDomain::resolve(0.0, 0.6, Some(f64::NAN)).max, 0.6);
}
