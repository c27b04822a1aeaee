// File: crates/chart-core/src/interaction.rs
// Summary: Pointer-to-entity hit testing, hover/click events and tooltip placement.
// Notes:
// - Pointer positions arrive in container coordinates and are converted to plot-local
//   coordinates (origin at the plot's top-left) before hit testing.

use tracing::trace;

use crate::geometry::{clamp, PointF, RectF, SizeF};
use crate::scale::BandScale;
use crate::scene::{Primitive, Role, Style, TextAnchor};
use crate::selection::SelectionBridge;
use crate::theme::Theme;
use crate::types::EntityId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(PointF),
    Click(PointF),
    Leave,
}

/// What the pointer can hit on a given chart.
#[derive(Clone, Debug)]
pub enum HitTarget {
    /// Category columns: the whole slot of a band is its hit region.
    Bands(BandScale),
    /// Rendered points in plot-local pixels; nearest within the radius wins.
    Points(Vec<(EntityId, PointF)>),
}

impl HitTarget {
    pub fn hit(&self, p: PointF, plot: SizeF, max_radius: f32) -> Option<EntityId> {
        match self {
            HitTarget::Bands(scale) => {
                if p.y < 0.0 || p.y > plot.height {
                    return None;
                }
                scale.category_at(p.x).map(EntityId::from)
            }
            HitTarget::Points(points) => nearest_point(points, p, max_radius).map(|i| points[i].0.clone()),
        }
    }
}

/// Index of the point closest to `p` within `max_radius`; ties go to the earliest point.
pub fn nearest_point(points: &[(EntityId, PointF)], p: PointF, max_radius: f32) -> Option<usize> {
    let limit = max_radius * max_radius;
    let mut best: Option<(usize, f32)> = None;
    for (i, (_, q)) in points.iter().enumerate() {
        let d = q.distance_sq(p);
        if !d.is_finite() || d > limit {
            continue;
        }
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
    pub entity: EntityId,
    /// Pointer in plot-local coordinates.
    pub pointer: PointF,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    Hovered(Hover),
    HoverCleared,
    Clicked(EntityId),
}

pub struct InteractionLayer {
    plot: RectF,
    target: HitTarget,
    max_radius: f32,
    hover: Option<Hover>,
}

impl InteractionLayer {
    /// `plot` is the plotting rectangle in container coordinates.
    pub fn new(plot: RectF, target: HitTarget, max_radius: f32) -> Self {
        Self { plot, target, max_radius, hover: None }
    }

    pub fn hover(&self) -> Option<&Hover> { self.hover.as_ref() }

    pub fn to_plot(&self, container_point: PointF) -> PointF {
        container_point.offset(-self.plot.left, -self.plot.top)
    }

    pub fn hit_test(&self, container_point: PointF) -> Option<EntityId> {
        let p = self.to_plot(container_point);
        if p.x < 0.0 || p.x > self.plot.width {
            return None;
        }
        self.target.hit(p, self.plot.size(), self.max_radius)
    }

    /// Apply one pointer event. Returns the resulting event, if any.
    ///
    /// A move without a hit clears an active hover; leave always clears.
    pub fn handle(&mut self, event: PointerEvent) -> Option<InteractionEvent> {
        match event {
            PointerEvent::Move(pos) => match self.hit_test(pos) {
                Some(entity) => {
                    let hover = Hover { entity, pointer: self.to_plot(pos) };
                    trace!(entity = %hover.entity, "hover");
                    self.hover = Some(hover.clone());
                    Some(InteractionEvent::Hovered(hover))
                }
                None => self.hover.take().map(|_| InteractionEvent::HoverCleared),
            },
            PointerEvent::Click(pos) => self.hit_test(pos).map(InteractionEvent::Clicked),
            PointerEvent::Leave => {
                self.hover = None;
                Some(InteractionEvent::HoverCleared)
            }
        }
    }

    /// Apply an event, forward hover changes to `on_hover`, and toggle the bridge on click.
    pub fn dispatch<F>(&mut self, event: PointerEvent, selection: &SelectionBridge, mut on_hover: F) -> Option<InteractionEvent>
    where
        F: FnMut(Option<&EntityId>),
    {
        let out = self.handle(event);
        match &out {
            Some(InteractionEvent::Hovered(h)) => on_hover(Some(&h.entity)),
            Some(InteractionEvent::HoverCleared) => on_hover(None),
            Some(InteractionEvent::Clicked(id)) => {
                selection.toggle(id.clone());
            }
            None => {}
        }
        out
    }
}

/// Fixed-size tooltip rectangle near `pointer`, kept inside `container`.
///
/// Placed below-right of the pointer by `offset`; flips above when it would
/// overflow the bottom and to the left when it would overflow the right, then
/// clamps to the container. A panel larger than the container pins to its origin.
pub fn place_tooltip(pointer: PointF, size: SizeF, container: SizeF, offset: f32) -> RectF {
    let (w, h) = (size.width.max(0.0), size.height.max(0.0));
    let mut x = pointer.x + offset;
    if x + w > container.width {
        x = pointer.x - offset - w;
    }
    let mut y = pointer.y + offset;
    if y + h > container.height {
        y = pointer.y - offset - h;
    }
    let x = clamp(x, 0.0, (container.width - w).max(0.0));
    let y = clamp(y, 0.0, (container.height - h).max(0.0));
    RectF::from_ltwh(x, y, w, h)
}

/// Panel background plus one text line per entry.
pub fn tooltip_primitives(rect: RectF, lines: &[String], theme: &Theme) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(lines.len() + 1);
    out.push(Primitive::rect(rect, Style::fill_stroke(theme.tooltip_fill, theme.axis_line, 1.0), Role::Tooltip));
    for (i, line) in lines.iter().enumerate() {
        let at = PointF::new(rect.left + 8.0, rect.top + 18.0 + i as f32 * 16.0);
        if at.y > rect.bottom() {
            break;
        }
        out.push(Primitive::text(at, line.as_str(), 12.0, TextAnchor::Start, theme.tooltip_text, Role::TooltipText));
    }
    out
}
