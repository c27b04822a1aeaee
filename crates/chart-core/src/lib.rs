// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building chart scenes.

pub mod types;
pub mod geometry;
pub mod error;
pub mod scale;
pub mod container;
pub mod grid;
pub mod axis;
pub mod theme;
pub mod scene;
pub mod series;
pub mod curve;
pub mod downsample;
pub mod overlay;
pub mod shared;
pub mod selection;
pub mod interaction;
pub mod stats;
pub mod config;
pub mod chart;
pub mod svg;

pub use chart::{Chart, ChartInputs, ChartKind};
pub use config::{InteractionOptions, OverlayStyle, RenderOptions, SharedScaleOptions};
pub use container::{plot_area, ResizeObserver, ResponsiveContainer};
pub use error::{ChartError, ModelError};
pub use geometry::{PointF, RectF, SizeF};
pub use axis::{nice_ticks, Axis, TickFormat};
pub use scale::{Band, BandScale, LinearScale};
pub use scene::{Primitive, Rgba, Role, Scene};
pub use series::{CategoricalFrequency, DensityCurve, DistributionSummary, ErrorBracket, ReferencePoint, TrendlineSeries};
pub use shared::{compute_shared_max, SharedDomain, SharedScaleCoordinator};
pub use selection::SelectionBridge;
pub use interaction::{HitTarget, InteractionEvent, InteractionLayer, PointerEvent};
pub use theme::Theme;
pub use types::{EntityId, Insets};
pub use downsample::lttb;
