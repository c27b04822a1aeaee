// File: crates/chart-core/tests/interaction.rs
// Purpose: Hit testing, hover/leave events, click-to-select and tooltip placement.

use std::cell::RefCell;
use std::rc::Rc;

use ensemble_chart_core::geometry::{PointF, RectF, SizeF};
use ensemble_chart_core::interaction::{
    nearest_point, place_tooltip, tooltip_primitives, HitTarget, InteractionEvent, InteractionLayer, PointerEvent,
};
use ensemble_chart_core::scale::BandScale;
use ensemble_chart_core::scene::Role;
use ensemble_chart_core::{EntityId, SelectionBridge, Theme};

fn band_layer() -> InteractionLayer {
    let plot = RectF::from_ltwh(64.0, 32.0, 800.0, 400.0);
    InteractionLayer::new(plot, HitTarget::Bands(BandScale::new(["1", "2", "3", "4"], (0.0, 800.0), 0.2)), 12.0)
}

#[test]
fn whole_column_is_the_hit_region() {
    let layer = band_layer();
    // plot-local x 250 is inside band "2"; x 199 is in the gap but still column "1"
    assert_eq!(layer.hit_test(PointF::new(64.0 + 250.0, 100.0)), Some(EntityId::from("2")));
    assert_eq!(layer.hit_test(PointF::new(64.0 + 199.0, 400.0)), Some(EntityId::from("1")));
    assert_eq!(layer.hit_test(PointF::new(10.0, 100.0)), None);
    assert_eq!(layer.hit_test(PointF::new(300.0, 500.0)), None);
}

#[test]
fn nearest_point_within_radius_and_first_wins_ties() {
    let pts = vec![
        (EntityId::from("a"), PointF::new(10.0, 10.0)),
        (EntityId::from("b"), PointF::new(20.0, 10.0)),
        (EntityId::from("c"), PointF::new(100.0, 100.0)),
    ];
    assert_eq!(nearest_point(&pts, PointF::new(15.0, 10.0), 12.0), Some(0));
    assert_eq!(nearest_point(&pts, PointF::new(19.0, 11.0), 12.0), Some(1));
    assert_eq!(nearest_point(&pts, PointF::new(60.0, 60.0), 12.0), None);
    assert_eq!(nearest_point(&[], PointF::new(0.0, 0.0), 12.0), None);
}

#[test]
fn hover_then_leave_clears() {
    let mut layer = band_layer();
    let ev = layer.handle(PointerEvent::Move(PointF::new(64.0 + 450.0, 100.0)));
    match ev {
        Some(InteractionEvent::Hovered(h)) => {
            assert_eq!(h.entity.as_str(), "3");
            assert_eq!(h.pointer, PointF::new(450.0, 68.0));
        }
        other => panic!("expected hover, got {other:?}"),
    }
    assert!(layer.hover().is_some());
    assert_eq!(layer.handle(PointerEvent::Leave), Some(InteractionEvent::HoverCleared));
    assert!(layer.hover().is_none());
    // leave always clears, even with nothing hovered
    assert_eq!(layer.handle(PointerEvent::Leave), Some(InteractionEvent::HoverCleared));
}

#[test]
fn moving_off_every_target_clears_once() {
    let mut layer = band_layer();
    layer.handle(PointerEvent::Move(PointF::new(100.0, 100.0)));
    assert_eq!(layer.handle(PointerEvent::Move(PointF::new(5.0, 5.0))), Some(InteractionEvent::HoverCleared));
    assert_eq!(layer.handle(PointerEvent::Move(PointF::new(5.0, 5.0))), None);
}

#[test]
fn dispatch_forwards_hover_and_toggles_selection() {
    let mut layer = band_layer();
    let bridge = SelectionBridge::new();
    let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();

    let log = Rc::clone(&seen);
    let mut on_hover = move |id: Option<&EntityId>| log.borrow_mut().push(id.map(|e| e.to_string()));

    layer.dispatch(PointerEvent::Move(PointF::new(64.0 + 50.0, 50.0)), &bridge, &mut on_hover);
    layer.dispatch(PointerEvent::Click(PointF::new(64.0 + 50.0, 50.0)), &bridge, &mut on_hover);
    assert_eq!(bridge.selected(), Some(EntityId::from("1")));
    layer.dispatch(PointerEvent::Click(PointF::new(64.0 + 50.0, 50.0)), &bridge, &mut on_hover);
    assert_eq!(bridge.selected(), None);
    layer.dispatch(PointerEvent::Leave, &bridge, &mut on_hover);

    assert_eq!(*seen.borrow(), vec![Some("1".to_string()), None]);
}

#[test]
fn click_outside_targets_does_nothing() {
    let mut layer = band_layer();
    let bridge = SelectionBridge::new();
    assert_eq!(layer.dispatch(PointerEvent::Click(PointF::new(1.0, 1.0)), &bridge, |_| {}), None);
    assert_eq!(bridge.selected(), None);
}

#[test]
fn tooltip_offsets_from_pointer() {
    let r = place_tooltip(PointF::new(10.0, 10.0), SizeF::new(160.0, 64.0), SizeF::new(400.0, 300.0), 12.0);
    assert_eq!((r.left, r.top, r.width, r.height), (22.0, 22.0, 160.0, 64.0));
}

#[test]
fn tooltip_flips_near_bottom_right() {
    let r = place_tooltip(PointF::new(390.0, 290.0), SizeF::new(160.0, 64.0), SizeF::new(400.0, 300.0), 12.0);
    assert_eq!((r.left, r.top), (218.0, 214.0));
}

#[test]
fn tooltip_larger_than_container_is_pinned_at_origin() {
    let r = place_tooltip(PointF::new(50.0, 50.0), SizeF::new(500.0, 400.0), SizeF::new(400.0, 300.0), 12.0);
    assert_eq!((r.left, r.top), (0.0, 0.0));
}

#[test]
fn tooltip_primitives_have_panel_and_lines() {
    let rect = RectF::from_ltwh(0.0, 0.0, 160.0, 64.0);
    let prims = tooltip_primitives(rect, &["District 3".to_string(), "Median 42%".to_string()], &Theme::dark());
    assert_eq!(prims.iter().filter(|p| p.role == Role::Tooltip).count(), 1);
    assert_eq!(prims.iter().filter(|p| p.role == Role::TooltipText).count(), 2);
}
