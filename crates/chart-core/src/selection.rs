// File: crates/chart-core/src/selection.rs
// Summary: Selected-entity state shared by one chart and its paired table.
// Notes:
// - Cloning a bridge shares the same cell; there is no per-consumer copy.
// - Single-threaded: whichever interaction toggles last wins.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::types::EntityId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<EntityId>,
    /// Filter category (e.g. demographic group) the ids belong to.
    pub category: Option<String>,
}

type Listener = Rc<dyn Fn(Option<&EntityId>)>;

#[derive(Default)]
struct Inner {
    state: SelectionState,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
}

/// Handle returned by `subscribe`; pass it to `unsubscribe` to stop notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Clone, Default)]
pub struct SelectionBridge {
    inner: Rc<RefCell<Inner>>,
}

impl SelectionBridge {
    pub fn new() -> Self { Self::default() }

    pub fn selected(&self) -> Option<EntityId> { self.inner.borrow().state.selected.clone() }

    pub fn is_selected(&self, id: &EntityId) -> bool { self.inner.borrow().state.selected.as_ref() == Some(id) }

    pub fn state(&self) -> SelectionState { self.inner.borrow().state.clone() }

    /// Select `id`, or clear when it is already selected. Returns the new selection.
    pub fn toggle(&self, id: impl Into<EntityId>) -> Option<EntityId> {
        let id = id.into();
        let next = {
            let mut inner = self.inner.borrow_mut();
            let next = if inner.state.selected.as_ref() == Some(&id) { None } else { Some(id) };
            inner.state.selected = next.clone();
            next
        };
        debug!(selected = ?next, "selection toggled");
        self.notify(next.as_ref());
        next
    }

    pub fn clear(&self) {
        let had = self.inner.borrow_mut().state.selected.take().is_some();
        if had {
            self.notify(None);
        }
    }

    /// Switch the active filter category; a different category clears the selection.
    /// Returns `true` when a selection was cleared.
    pub fn set_filter_category(&self, category: impl Into<String>) -> bool {
        let category = category.into();
        let cleared = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.category.as_deref() == Some(category.as_str()) {
                return false;
            }
            inner.state.category = Some(category);
            inner.state.selected.take().is_some()
        };
        if cleared {
            debug!("selection cleared by filter change");
            self.notify(None);
        }
        cleared
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Option<&EntityId>) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push((id, Rc::new(listener)));
        ListenerId(id)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.retain(|(k, _)| *k != id.0);
    }

    /// Listeners run after the borrow is released so they may read the bridge.
    fn notify(&self, selected: Option<&EntityId>) {
        let listeners: Vec<Listener> = self.inner.borrow().listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(selected);
        }
    }
}
