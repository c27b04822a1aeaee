// File: crates/chart-core/src/overlay/mod.rs
// Summary: Stateless overlay renderer trait and the scale bundles the overlays draw against.
// Notes:
// - Renderers are pure functions of (scales, rows, style, theme); they hold no mutable state,
//   so geometry can be asserted directly in tests without any UI host.

pub mod bars;
pub mod boxplot;
pub mod density;
pub mod trend;

use crate::config::OverlayStyle;
use crate::scale::{BandScale, LinearScale};
use crate::scene::Primitive;
use crate::theme::Theme;

pub use bars::{BarLayout, FrequencyBarsOverlay};
pub use boxplot::{spread_markers, BoxPlotRow, BoxWhiskerOverlay};
pub use density::DensityOverlay;
pub use trend::{ErrorBracketOverlay, TrendlineOverlay};

/// Category (band) x-axis with a linear y-axis.
#[derive(Clone, Debug)]
pub struct CategoryScales {
    pub x: BandScale,
    pub y: LinearScale,
}

/// Linear x and y axes.
#[derive(Clone, Copy, Debug)]
pub struct XyScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

/// Draws one family of statistical overlays.
pub trait OverlayRenderer {
    type Scales;
    type Row;

    fn id(&self) -> &'static str;

    /// Geometry for `rows`. Rows missing data for an element skip that element only.
    fn render(&self, scales: &Self::Scales, rows: &[Self::Row], style: &OverlayStyle, theme: &Theme) -> Vec<Primitive>;
}
