// File: crates/chart-core/src/container.rs
// Summary: Responsive container: tracks the host element size and derives the inner plotting area.
// Notes:
// - The host platform owns the actual observer; it is handed in through `ResizeObserver`
//   and is detached exactly once, either explicitly or when the container is dropped.

use tracing::debug;

use crate::geometry::{RectF, SizeF};
use crate::types::Insets;

/// Host-side size observation handle.
pub trait ResizeObserver {
    /// Stop delivering size notifications.
    fn unobserve(&mut self);
}

/// Inner plotting rectangle for a container of `size` with `insets` margins.
///
/// Dimensions are clamped at zero; `None` means there is nothing to plot into.
pub fn plot_area(size: SizeF, insets: &Insets) -> Option<RectF> {
    let width = (size.width - insets.hsum() as f32).max(0.0);
    let height = (size.height - insets.vsum() as f32).max(0.0);
    if width > 0.0 && height > 0.0 {
        Some(RectF::from_ltwh(insets.left as f32, insets.top as f32, width, height))
    } else {
        None
    }
}

pub struct ResponsiveContainer<O: ResizeObserver> {
    observer: Option<O>,
    insets: Insets,
    size: Option<SizeF>,
    generation: u64,
}

impl<O: ResizeObserver> ResponsiveContainer<O> {
    pub fn new(observer: O, insets: Insets) -> Self {
        Self { observer: Some(observer), insets, size: None, generation: 0 }
    }

    /// Record a size notification. Returns `true` when the size changed and
    /// dependents must recompute; an unchanged size is a no-op.
    pub fn on_resize(&mut self, size: SizeF) -> bool {
        if self.observer.is_none() {
            return false;
        }
        let size = SizeF::new(sanitize(size.width), sanitize(size.height));
        if self.size == Some(size) {
            return false;
        }
        self.size = Some(size);
        self.generation += 1;
        debug!(width = size.width, height = size.height, generation = self.generation, "container resized");
        true
    }

    /// Last observed size, if any notification arrived yet.
    pub fn size(&self) -> Option<SizeF> { self.size }

    /// Number of distinct sizes seen; bumps only on real changes.
    pub fn generation(&self) -> u64 { self.generation }

    pub fn insets(&self) -> Insets { self.insets }

    /// Inner plotting area, or `None` before the first notification or when collapsed.
    pub fn plot_area(&self) -> Option<RectF> { self.size.and_then(|s| plot_area(s, &self.insets)) }

    pub fn is_observing(&self) -> bool { self.observer.is_some() }

    /// Stop observing; safe to call more than once.
    pub fn detach(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.unobserve();
            debug!("container observer detached");
        }
    }
}

impl<O: ResizeObserver> Drop for ResponsiveContainer<O> {
    fn drop(&mut self) { self.detach(); }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
