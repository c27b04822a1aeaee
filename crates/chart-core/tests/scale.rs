// File: crates/chart-core/tests/scale.rs
// Purpose: Linear and band scale mappings, including inverted and degenerate cases.

use ensemble_chart_core::scale::{BandScale, LinearScale, ScaleTransform};

fn approx(a: f32, b: f32) -> bool { (a - b).abs() < 1e-3 }

#[test]
fn median_maps_to_expected_pixel_on_inverted_range() {
    let y = LinearScale::new((0.0, 1.0), (300.0, 0.0));
    assert!(approx(y.scale(0.4), 180.0), "got {}", y.scale(0.4));
    assert!(approx(y.scale(0.0), 300.0));
    assert!(approx(y.scale(1.0), 0.0));
}

#[test]
fn plain_mapping_does_not_clamp_but_clamped_does() {
    let y = LinearScale::new((0.0, 1.0), (300.0, 0.0));
    assert!(approx(y.scale(1.5), -150.0));
    assert!(approx(y.scale_clamped(1.5), 0.0));
    assert!(approx(y.scale_clamped(-0.2), 300.0));
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let s = LinearScale::new((0.5, 0.5), (0.0, 200.0));
    assert!(s.is_degenerate());
    for v in [0.0, 0.5, 10.0] {
        let px = s.scale(v);
        assert!(px.is_finite());
        assert!(approx(px, 100.0));
    }
}

#[test]
fn degenerate_range_inverts_to_domain_midpoint() {
    let s = LinearScale::new((0.0, 1.0), (50.0, 50.0));
    assert!((s.invert(50.0) - 0.5).abs() < 1e-12);
    assert!((s.from_px(10.0) - 0.5).abs() < 1e-12);
}

#[test]
fn invert_round_trips() {
    let s = LinearScale::new((0.2, 0.8), (400.0, 40.0));
    for v in [0.2, 0.35, 0.5, 0.8] {
        assert!((s.invert(s.scale(v)) - v).abs() < 1e-5);
    }
}

#[test]
fn band_scale_splits_range_with_half_gaps_at_edges() {
    let b = BandScale::new(["1", "2", "3", "4"], (0.0, 400.0), 0.2);
    assert!(approx(b.step(), 100.0));
    assert!(approx(b.bandwidth(), 80.0));
    assert!(approx(b.gap(), 20.0));

    let first = b.band("1").expect("band 1");
    assert!(approx(first.start, 10.0));
    let last = b.band("4").expect("band 4");
    assert!(approx(last.end(), 390.0));
    assert!(approx(b.center("2").expect("center"), 150.0));
    assert!(b.band("5").is_none());
}

#[test]
fn band_scale_supports_inverted_range() {
    let b = BandScale::new(["a", "b"], (200.0, 0.0), 0.0);
    let a = b.band("a").expect("a");
    let bb = b.band("b").expect("b");
    assert!(approx(a.start, 100.0));
    assert!(approx(bb.start, 0.0));
    assert_eq!(b.category_at(150.0), Some("a"));
    assert_eq!(b.category_at(50.0), Some("b"));
}

#[test]
fn index_at_covers_full_slot_including_far_edge() {
    let b = BandScale::new(["1", "2", "3"], (0.0, 300.0), 0.5);
    // gap region belongs to the slot it sits in
    assert_eq!(b.index_at(1.0), Some(0));
    assert_eq!(b.index_at(99.0), Some(0));
    assert_eq!(b.index_at(100.0), Some(1));
    assert_eq!(b.index_at(300.0), Some(2));
    assert_eq!(b.index_at(301.0), None);
    assert_eq!(b.index_at(-1.0), None);
    assert_eq!(b.index_at(f32::NAN), None);
}

#[test]
fn empty_band_scale_has_no_bands() {
    let b = BandScale::new(Vec::<String>::new(), (0.0, 100.0), 0.1);
    assert!(b.is_empty());
    assert_eq!(b.bandwidth(), 0.0);
    assert!(b.band_at(0).is_none());
    assert!(b.index_at(10.0).is_none());
}
