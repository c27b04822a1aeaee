// File: crates/chart-core/tests/properties.rs
// Purpose: Property-based checks of the numeric laws the renderers rely on.

use ensemble_chart_core::config::{OverlayStyle, SharedScaleOptions};
use ensemble_chart_core::curve::{flatten, monotone_area, monotone_x};
use ensemble_chart_core::downsample::lttb;
use ensemble_chart_core::geometry::{PointF, SizeF};
use ensemble_chart_core::interaction::place_tooltip;
use ensemble_chart_core::overlay::{BoxPlotRow, BoxWhiskerOverlay, CategoryScales, OverlayRenderer};
use ensemble_chart_core::scale::{BandScale, LinearScale};
use ensemble_chart_core::scene::{Role, Shape};
use ensemble_chart_core::series::DistributionSummary;
use ensemble_chart_core::shared::{compute_shared_max, SharedScaleCoordinator};
use ensemble_chart_core::stats::{histogram_density, summarize};
use ensemble_chart_core::{nice_ticks, Theme};
use proptest::prelude::*;

fn unit_samples(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0f64..=1.0, min_len..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invert_undoes_scale(
        d0 in -1000.0f64..1000.0,
        dw in 0.001f64..1000.0,
        r0 in 0.0f32..1000.0,
        rw in 10.0f32..1000.0,
        inverted in any::<bool>(),
        t in 0.0f64..=1.0,
    ) {
        let range = if inverted { (r0 + rw, r0) } else { (r0, r0 + rw) };
        let s = LinearScale::new((d0, d0 + dw), range);
        let x = d0 + t * dw;
        let back = s.invert(s.scale(x));
        let tol = dw / rw as f64 * 1e-3 + 1e-9;
        prop_assert!((back - x).abs() <= tol, "x={} back={} tol={}", x, back, tol);
    }

    #[test]
    fn bands_are_equal_and_fill_the_range(
        n in 1usize..30,
        padding in 0.0f32..0.9,
        start in -500.0f32..500.0,
        len in 10.0f32..2000.0,
    ) {
        let cats: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let b = BandScale::new(cats, (start, start + len), padding);
        let total = n as f32 * (b.bandwidth() + b.gap());
        prop_assert!((total - len).abs() <= len * 1e-5);
        for i in 0..n {
            let band = b.band_at(i).expect("band");
            prop_assert!((band.width - b.bandwidth()).abs() < 1e-6);
            if i > 0 {
                let prev = b.band_at(i - 1).expect("band");
                prop_assert!((band.start - prev.start - b.step()).abs() <= 1e-3);
            }
        }
    }

    #[test]
    fn shared_max_covers_every_value_and_is_stable(
        a in proptest::collection::vec(0.0f64..1e6, 0..20),
        b in proptest::collection::vec(0.0f64..1e6, 1..20),
        padding in 0.0f64..0.5,
        snap in prop::sample::select(vec![0.0, 0.1, 1.0, 25.0, 100.0]),
    ) {
        let datasets = vec![a, b];
        let max = datasets.iter().flatten().copied().fold(0.0, f64::max);
        let got = compute_shared_max(&datasets, padding, snap, 1.0);
        prop_assert_eq!(got, compute_shared_max(&datasets, padding, snap, 1.0));
        if max > 0.0 {
            prop_assert!(got >= max, "shared {} below max {}", got, max);
            if snap > 0.0 {
                // a snapped ceiling is a fixed point of the unpadded computation
                prop_assert_eq!(compute_shared_max(&[vec![got]], 0.0, snap, 1.0), got);
            }
        } else {
            prop_assert_eq!(got, 1.0);
        }
        let mut coordinator = SharedScaleCoordinator::new(SharedScaleOptions { padding_fraction: padding, snap_step: snap, default_max: 1.0 });
        prop_assert_eq!(coordinator.shared_max(&datasets), got);
        prop_assert_eq!(coordinator.shared_max(&datasets), got);
    }

    #[test]
    fn box_pixels_follow_quartile_order(mut v in proptest::collection::vec(0.0f64..=1.0, 5), inverted in any::<bool>()) {
        v.sort_by(|a, b| a.total_cmp(b));
        let summary = DistributionSummary::new("1", v[0], v[1], v[2], v[2], v[3], v[4]);
        let range = if inverted { (300.0, 0.0) } else { (0.0, 300.0) };
        let scales = CategoryScales { x: BandScale::new(["1"], (0.0, 100.0), 0.2), y: LinearScale::new((0.0, 1.0), range) };
        let prims = BoxWhiskerOverlay.render(&scales, &BoxPlotRow::join(&[summary], &[]), &OverlayStyle::default(), &Theme::dark());
        let rect = prims.iter().find_map(|p| match (&p.shape, p.role) { (Shape::Rect(r), Role::Box) => Some(*r), _ => None }).expect("box");
        let median_y = prims.iter().find_map(|p| match (&p.shape, p.role) { (Shape::Line { from, .. }, Role::Median) => Some(from.y), _ => None }).expect("median");
        prop_assert!(median_y >= rect.top - 1e-3 && median_y <= rect.bottom() + 1e-3);
        let (y1, y3) = (scales.y.scale(v[1]), scales.y.scale(v[3]));
        if inverted { prop_assert!(y3 <= y1); } else { prop_assert!(y1 <= y3); }
    }

    #[test]
    fn monotone_curve_never_overshoots(
        steps in proptest::collection::vec((1.0f32..50.0, 0.0f32..500.0), 3..20),
    ) {
        let mut x = 0.0f32;
        let pts: Vec<PointF> = steps.iter().map(|&(dx, y)| { x += dx; PointF::new(x, y) }).collect();
        let k = 16;
        let flat = flatten(&monotone_x(&pts), k);
        prop_assert_eq!(flat.len(), 1 + (pts.len() - 1) * k);
        for i in 0..pts.len() - 1 {
            let (lo, hi) = (pts[i].y.min(pts[i + 1].y), pts[i].y.max(pts[i + 1].y));
            for p in &flat[1 + i * k..=(i + 1) * k] {
                prop_assert!(p.y >= lo - 1e-2 && p.y <= hi + 1e-2, "segment {} y {} outside [{}, {}]", i, p.y, lo, hi);
            }
        }
    }

    #[test]
    fn monotone_curve_survives_repeated_x(
        steps in proptest::collection::vec((prop::sample::select(vec![0.0f32, 0.0, 1.0, 7.5]), 0.0f32..500.0), 1..12),
    ) {
        let mut x = 0.0f32;
        let pts: Vec<PointF> = steps.iter().map(|&(dx, y)| { x += dx; PointF::new(x, y) }).collect();
        let mut distinct: Vec<f32> = pts.iter().map(|p| p.x).collect();
        distinct.dedup();
        let cmds = monotone_x(&pts);
        prop_assert_eq!(cmds.len(), distinct.len());
        let flat = flatten(&cmds, 8);
        prop_assert!(flat.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        let area = monotone_area(&pts, 600.0);
        prop_assert!(area.is_empty() == (distinct.len() < 2));
    }

    #[test]
    fn tooltip_stays_inside_container(
        cw in 50.0f32..2000.0,
        ch in 50.0f32..2000.0,
        tw in 0.0f32..3000.0,
        th in 0.0f32..3000.0,
        fx in 0.0f32..=1.0,
        fy in 0.0f32..=1.0,
        offset in 0.0f32..30.0,
    ) {
        let r = place_tooltip(PointF::new(fx * cw, fy * ch), SizeF::new(tw, th), SizeF::new(cw, ch), offset);
        if tw <= cw {
            prop_assert!(r.left >= -1e-3 && r.right() <= cw + 1e-3);
        } else {
            prop_assert_eq!(r.left, 0.0);
        }
        if th <= ch {
            prop_assert!(r.top >= -1e-3 && r.bottom() <= ch + 1e-3);
        } else {
            prop_assert_eq!(r.top, 0.0);
        }
    }

    #[test]
    fn ticks_stay_inside_and_increase(lo in -1e6f64..1e6, span in 1e-6f64..1e6, n in 2usize..12) {
        let hi = lo + span;
        let ticks = nice_ticks(lo, hi, n);
        prop_assert!(!ticks.is_empty());
        prop_assert!(ticks.iter().all(|&t| t >= lo && t <= hi));
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn histogram_density_has_unit_area(samples in unit_samples(1, 400), bins in 1usize..100) {
        let est = histogram_density("s", &samples, bins, (0.0, 1.0)).expect("density");
        let width = 1.0 / bins as f64;
        let area: f64 = est.curve.samples.iter().map(|&(_, y)| y * width).sum();
        prop_assert!((area - 1.0).abs() < 1e-9, "area {}", area);
        prop_assert!(est.peak_y >= 0.0);
    }

    #[test]
    fn summaries_from_samples_are_valid(samples in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
        let s = summarize("d", &samples).expect("summary");
        prop_assert!(s.validate().is_ok(), "{:?}", s);
    }

    #[test]
    fn lttb_keeps_endpoints_and_bound(n in 3usize..400, frac in 0.0f64..=1.0) {
        let points: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, (i as f64 * 0.3).sin())).collect();
        let threshold = 3 + ((n - 3) as f64 * frac) as usize;
        let out = lttb(&points, threshold);
        prop_assert!(out.len() <= threshold);
        prop_assert_eq!(out.first(), points.first());
        prop_assert_eq!(out.last(), points.last());
        prop_assert!(out.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
