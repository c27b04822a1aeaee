// File: crates/chart-core/src/scale.rs
// Summary: Linear (value) and band (category) scales mapping data domains to pixel ranges.

/// Data value on a numeric axis (fraction, count, density).
pub type Value = f64;

const EPS: f64 = 1e-12;

/// Common scale operations shared by overlay renderers and hit testing.
pub trait ScaleTransform {
    fn to_px(&self, v: Value) -> f32;
    fn from_px(&self, px: f32) -> Value;
}

/// Linear mapping `[d0, d1] -> [r0, r1]`; either interval may be inverted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    d0: Value,
    d1: Value,
    r0: f32,
    r1: f32,
}

impl LinearScale {
    pub fn new(domain: (Value, Value), range: (f32, f32)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    pub fn domain(&self) -> (Value, Value) { (self.d0, self.d1) }
    pub fn range(&self) -> (f32, f32) { (self.r0, self.r1) }

    /// Lower/upper pixel bounds regardless of orientation.
    pub fn range_extent(&self) -> (f32, f32) { (self.r0.min(self.r1), self.r0.max(self.r1)) }

    /// Lower/upper domain bounds regardless of orientation.
    pub fn domain_extent(&self) -> (Value, Value) { (self.d0.min(self.d1), self.d0.max(self.d1)) }

    /// Single-point domain (`lo == hi`).
    pub fn is_degenerate(&self) -> bool { (self.d1 - self.d0).abs() < EPS }

    /// Map a value to pixels. No clamping; a degenerate domain maps to the range midpoint.
    #[inline]
    pub fn scale(&self, v: Value) -> f32 {
        if self.is_degenerate() {
            return ((self.r0 as f64 + self.r1 as f64) * 0.5) as f32;
        }
        let t = (v - self.d0) / (self.d1 - self.d0);
        (self.r0 as f64 + t * (self.r1 as f64 - self.r0 as f64)) as f32
    }

    /// Map a value after clamping it into the domain, so it lands on the visible edge.
    #[inline]
    pub fn scale_clamped(&self, v: Value) -> f32 {
        let (lo, hi) = self.domain_extent();
        self.scale(v.clamp(lo, hi))
    }

    /// Inverse mapping; a zero-length range inverts to the domain midpoint.
    #[inline]
    pub fn invert(&self, px: f32) -> Value {
        let span = self.r1 as f64 - self.r0 as f64;
        if span.abs() < EPS {
            return (self.d0 + self.d1) * 0.5;
        }
        let t = (px as f64 - self.r0 as f64) / span;
        self.d0 + t * (self.d1 - self.d0)
    }

    pub fn contains(&self, v: Value) -> bool {
        let (lo, hi) = self.domain_extent();
        v >= lo - EPS && v <= hi + EPS
    }
}

impl ScaleTransform for LinearScale {
    fn to_px(&self, v: Value) -> f32 { self.scale(v) }
    fn from_px(&self, px: f32) -> Value { self.invert(px) }
}

/// Pixel span of one category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub start: f32,
    pub width: f32,
}

impl Band {
    pub fn center(&self) -> f32 { self.start + self.width * 0.5 }
    pub fn end(&self) -> f32 { self.start + self.width }
}

/// Ordered categories to contiguous, equally sized pixel bands.
///
/// `padding` is the fraction of each slot (`step`) left empty: identical gaps
/// between bands and half-gaps at both outer edges, so
/// `n * (bandwidth + gap) == |r1 - r0|`.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    categories: Vec<String>,
    r0: f32,
    r1: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    pub fn new<I, S>(categories: I, range: (f32, f32), padding: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        let padding = if padding.is_finite() { padding.clamp(0.0, 0.95) } else { 0.0 };
        let len = (range.1 - range.0).abs();
        let (step, bandwidth) = if categories.is_empty() {
            (0.0, 0.0)
        } else {
            let step = len / categories.len() as f32;
            (step, step * (1.0 - padding))
        };
        Self { categories, r0: range.0, r1: range.1, step, bandwidth }
    }

    pub fn len(&self) -> usize { self.categories.len() }
    pub fn is_empty(&self) -> bool { self.categories.is_empty() }
    pub fn categories(&self) -> &[String] { &self.categories }
    pub fn bandwidth(&self) -> f32 { self.bandwidth }
    /// Slot size: bandwidth plus one gap.
    pub fn step(&self) -> f32 { self.step }
    pub fn gap(&self) -> f32 { self.step - self.bandwidth }
    pub fn range(&self) -> (f32, f32) { (self.r0, self.r1) }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Band of the `i`-th category; the first category sits at the `r0` end.
    pub fn band_at(&self, i: usize) -> Option<Band> {
        if i >= self.categories.len() {
            return None;
        }
        let half_gap = self.gap() * 0.5;
        let start = if self.r1 >= self.r0 {
            self.r0 + self.step * i as f32 + half_gap
        } else {
            self.r0 - self.step * (i + 1) as f32 + half_gap
        };
        Some(Band { start, width: self.bandwidth })
    }

    pub fn band(&self, category: &str) -> Option<Band> {
        self.index_of(category).and_then(|i| self.band_at(i))
    }

    pub fn center(&self, category: &str) -> Option<f32> { self.band(category).map(|b| b.center()) }

    /// Category whose full slot (band plus surrounding half-gaps) contains `px`.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if self.categories.is_empty() || self.step <= 0.0 || !px.is_finite() {
            return None;
        }
        let offset = if self.r1 >= self.r0 { px - self.r0 } else { self.r0 - px };
        if offset < 0.0 {
            return None;
        }
        let i = (offset / self.step).floor() as usize;
        if i < self.categories.len() {
            Some(i)
        } else if (offset - self.step * self.categories.len() as f32).abs() < 1e-3 {
            // exactly on the far edge
            Some(self.categories.len() - 1)
        } else {
            None
        }
    }

    pub fn category_at(&self, px: f32) -> Option<&str> {
        self.index_at(px).map(|i| self.categories[i].as_str())
    }
}
