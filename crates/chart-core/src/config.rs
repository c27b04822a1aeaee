// File: crates/chart-core/src/config.rs
// Summary: Render options (surface size, margins, theme, overlay style, interaction, shared scale).
// Notes:
// - Every field has a default so partial JSON option files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::geometry::SizeF;
use crate::theme::{self, Theme};
use crate::types::{Insets, HEIGHT, WIDTH};

/// Geometry knobs shared by the overlay renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Box width as a fraction of the category bandwidth.
    pub box_width_fraction: f32,
    /// Whisker cap width as a fraction of the category bandwidth.
    pub cap_width_fraction: f32,
    /// Mean/reference markers closer than this (px) are spread apart.
    pub collision_threshold_px: f32,
    /// Horizontal displacement applied to colliding markers (px).
    pub marker_offset_px: f32,
    pub marker_radius_px: f32,
    /// Half-width of the horizontal caps on error brackets (px).
    pub bracket_half_width_px: f32,
    pub ci_opacity: f32,
    pub area_opacity: f32,
    /// Padding between category bands.
    pub band_padding: f32,
    /// Padding between grouped bars inside one band.
    pub group_padding: f32,
    /// Trendlines longer than this are reduced with LTTB before smoothing.
    pub max_trend_points: usize,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            box_width_fraction: 0.80,
            cap_width_fraction: 0.45,
            collision_threshold_px: 10.0,
            marker_offset_px: 5.0,
            marker_radius_px: 4.0,
            bracket_half_width_px: 6.0,
            ci_opacity: 0.15,
            area_opacity: 0.35,
            band_padding: 0.2,
            group_padding: 0.1,
            max_trend_points: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionOptions {
    /// Max distance (px) for nearest-point hits.
    pub hit_radius_px: f32,
    pub tooltip_width: f32,
    pub tooltip_height: f32,
    /// Gap between pointer and tooltip panel (px).
    pub tooltip_offset: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self { hit_radius_px: 12.0, tooltip_width: 160.0, tooltip_height: 64.0, tooltip_offset: 12.0 }
    }
}

/// Ceiling policy used when a chart computes its own upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedScaleOptions {
    pub padding_fraction: f64,
    pub snap_step: f64,
    /// Returned when there are no values at all.
    pub default_max: f64,
}

impl Default for SharedScaleOptions {
    fn default() -> Self { Self { padding_fraction: 0.05, snap_step: 0.1, default_max: 1.0 } }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    /// Theme preset name (see `theme::presets`).
    pub theme: String,
    pub draw_labels: bool,
    pub tick_count: usize,
    pub overlay: OverlayStyle,
    pub interaction: InteractionOptions,
    pub shared: SharedScaleOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: "dark".to_string(),
            draw_labels: true,
            tick_count: 5,
            overlay: OverlayStyle::default(),
            interaction: InteractionOptions::default(),
            shared: SharedScaleOptions::default(),
        }
    }
}

impl RenderOptions {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 0 || self.height < 0 {
            return Err(ChartError::InvalidOptions(format!("negative size {}x{}", self.width, self.height)));
        }
        let fractions = [
            ("box_width_fraction", self.overlay.box_width_fraction),
            ("cap_width_fraction", self.overlay.cap_width_fraction),
            ("band_padding", self.overlay.band_padding),
            ("group_padding", self.overlay.group_padding),
        ];
        for (name, v) in fractions {
            if !(0.0..=1.0).contains(&v) {
                return Err(ChartError::InvalidOptions(format!("{name} must be in [0, 1], got {v}")));
            }
        }
        if self.shared.snap_step < 0.0 || !self.shared.snap_step.is_finite() {
            return Err(ChartError::InvalidOptions(format!("snap_step must be >= 0, got {}", self.shared.snap_step)));
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme { theme::find(&self.theme) }

    pub fn size(&self) -> SizeF { SizeF::new(self.width.max(0) as f32, self.height.max(0) as f32) }

    /// Same options for a container of `size` (e.g. after a resize notification).
    pub fn with_size(&self, size: SizeF) -> Self {
        Self { width: size.width.round() as i32, height: size.height.round() as i32, ..self.clone() }
    }
}
