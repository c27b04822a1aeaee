// File: crates/chart-core/tests/selection.rs
// Purpose: Selection toggle/replace semantics, filter resets and listener notification.

use std::cell::RefCell;
use std::rc::Rc;

use ensemble_chart_core::{EntityId, SelectionBridge};

#[test]
fn toggle_selects_replaces_and_clears() {
    let bridge = SelectionBridge::new();
    assert_eq!(bridge.toggle("3"), Some(EntityId::from("3")));
    assert_eq!(bridge.toggle("5"), Some(EntityId::from("5")));
    assert!(bridge.is_selected(&EntityId::from("5")));
    assert_eq!(bridge.toggle("5"), None);
    assert_eq!(bridge.selected(), None);
}

#[test]
fn chart_and_table_share_one_state() {
    let chart = SelectionBridge::new();
    let table = chart.clone();
    chart.toggle(4u32);
    assert_eq!(table.selected(), Some(EntityId::from("4")));
    table.toggle("4");
    assert_eq!(chart.selected(), None);
}

#[test]
fn filter_category_change_clears_selection() {
    let bridge = SelectionBridge::new();
    assert!(!bridge.set_filter_category("black"));
    bridge.toggle("2");
    assert!(!bridge.set_filter_category("black"));
    assert_eq!(bridge.selected(), Some(EntityId::from("2")));
    assert!(bridge.set_filter_category("latino"));
    assert_eq!(bridge.selected(), None);
    assert_eq!(bridge.state().category.as_deref(), Some("latino"));
}

#[test]
fn listeners_see_every_change_and_may_read_the_bridge() {
    let bridge = SelectionBridge::new();
    let log: Rc<RefCell<Vec<Option<String>>>> = Rc::default();

    let (sink, reader) = (Rc::clone(&log), bridge.clone());
    let id = bridge.subscribe(move |selected| {
        // reading the bridge inside a notification must not panic
        assert_eq!(reader.selected().as_ref(), selected);
        sink.borrow_mut().push(selected.map(|e| e.to_string()));
    });

    bridge.toggle("1");
    bridge.toggle("2");
    bridge.clear();
    bridge.clear();
    bridge.unsubscribe(id);
    bridge.toggle("9");

    assert_eq!(*log.borrow(), vec![Some("1".to_string()), Some("2".to_string()), None]);
}
