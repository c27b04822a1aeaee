// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn distance_sq(&self, other: PointF) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self { Self::new(self.x + dx, self.y + dy) }
}

impl From<(f32, f32)> for PointF {
    fn from((x, y): (f32, f32)) -> Self { Self { x, y } }
}

/// Width/height pair, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const fn new(width: f32, height: f32) -> Self { Self { width, height } }

    /// True when either side is zero (or negative / NaN).
    pub fn is_empty(&self) -> bool { !(self.width > 0.0 && self.height > 0.0) }
}

/// Axis-aligned rectangle stored as origin + extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
    /// Build from two arbitrary corners; the result always has non-negative extent.
    pub fn from_corners(a: PointF, b: PointF) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self { left, top, width: (a.x - b.x).abs(), height: (a.y - b.y).abs() }
    }
    pub fn right(&self) -> f32 { self.left + self.width }
    pub fn bottom(&self) -> f32 { self.top + self.height }
    pub fn size(&self) -> SizeF { SizeF::new(self.width, self.height) }
    pub fn center(&self) -> PointF { PointF::new(self.left + self.width * 0.5, self.top + self.height * 0.5) }

    pub fn contains(&self, p: PointF) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// True when `other` lies fully inside `self` (edges inclusive, small tolerance).
    pub fn contains_rect(&self, other: &RectF) -> bool {
        const EPS: f32 = 1e-3;
        other.left >= self.left - EPS
            && other.top >= self.top - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
