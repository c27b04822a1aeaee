// File: crates/chart-core/src/scene.rs
// Summary: Declarative vector output (paths, rects, circles, lines, text) produced by every chart.
// Notes:
// - A scene is backend-agnostic; `svg` serializes it and the Skia crate rasterizes it.
// - Each primitive carries a `Role` so tests and hosts can find parts without pixel math.

use serde::Serialize;

use crate::geometry::{PointF, RectF};
use crate::types::EntityId;

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a } }

    /// Same color with alpha scaled by `opacity` in [0, 1].
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// `#rrggbb` form used by SVG output (alpha is emitted separately).
    pub fn hex(&self) -> String { format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b) }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Style {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
    /// Dash pattern (on, off) in pixels.
    pub dash: Option<(f32, f32)>,
}

impl Style {
    pub fn fill(color: Rgba) -> Self { Self { fill: Some(color), stroke: None, stroke_width: 0.0, dash: None } }
    pub fn stroke(color: Rgba, width: f32) -> Self { Self { fill: None, stroke: Some(color), stroke_width: width, dash: None } }
    pub fn fill_stroke(fill: Rgba, stroke: Rgba, width: f32) -> Self {
        Self { fill: Some(fill), stroke: Some(stroke), stroke_width: width, dash: None }
    }
    pub fn dashed(mut self, on: f32, off: f32) -> Self {
        self.dash = Some((on, off));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(PointF),
    LineTo(PointF),
    /// Cubic bezier: two control points then the end point.
    CubicTo(PointF, PointF, PointF),
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Shape {
    Line { from: PointF, to: PointF },
    Rect(RectF),
    Circle { center: PointF, radius: f32 },
    Path(Vec<PathCommand>),
    /// `at` is the baseline anchor point.
    Text { at: PointF, content: String, size: f32, anchor: TextAnchor },
}

/// What a primitive depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Background,
    Placeholder,
    Gridline,
    AxisLine,
    TickLabel,
    AxisTitle,
    LegendSwatch,
    LegendLabel,
    Highlight,
    Box,
    Median,
    Whisker,
    WhiskerCap,
    MeanMarker,
    ReferenceMarker,
    CiBand,
    CiEdge,
    DensityArea,
    DensityLine,
    Trendline,
    BracketSpine,
    BracketCap,
    Bar,
    Tooltip,
    TooltipText,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
    pub role: Role,
    pub entity: Option<EntityId>,
}

impl Primitive {
    pub fn new(shape: Shape, style: Style, role: Role) -> Self {
        Self { shape, style, role, entity: None }
    }

    pub fn line(from: PointF, to: PointF, style: Style, role: Role) -> Self {
        Self::new(Shape::Line { from, to }, style, role)
    }

    pub fn rect(rect: RectF, style: Style, role: Role) -> Self { Self::new(Shape::Rect(rect), style, role) }

    pub fn circle(center: PointF, radius: f32, style: Style, role: Role) -> Self {
        Self::new(Shape::Circle { center, radius }, style, role)
    }

    pub fn path(commands: Vec<PathCommand>, style: Style, role: Role) -> Self {
        Self::new(Shape::Path(commands), style, role)
    }

    pub fn text(at: PointF, content: impl Into<String>, size: f32, anchor: TextAnchor, color: Rgba, role: Role) -> Self {
        Self::new(Shape::Text { at, content: content.into(), size, anchor }, Style::fill(color), role)
    }

    pub fn for_entity(mut self, id: &EntityId) -> Self {
        self.entity = Some(id.clone());
        self
    }
}

/// A group of primitives drawn with a translation applied (plot-local coordinates).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layer {
    pub name: &'static str,
    pub translate: PointF,
    pub items: Vec<Primitive>,
}

impl Layer {
    pub fn new(name: &'static str, translate: PointF) -> Self { Self { name, translate, items: Vec::new() } }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Rgba,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f32, height: f32, background: Rgba) -> Self {
        Self { width, height, background, layers: Vec::new() }
    }

    /// Empty-state scene: one dashed outline path and a short message.
    pub fn placeholder(width: f32, height: f32, background: Rgba, ink: Rgba, message: &str) -> Self {
        let mut scene = Self::new(width, height, background);
        let mut layer = Layer::new("placeholder", PointF::default());
        let (w, h) = (width.max(0.0), height.max(0.0));
        let inset = 8.0f32.min(w * 0.5).min(h * 0.5);
        let outline = vec![
            PathCommand::MoveTo(PointF::new(inset, inset)),
            PathCommand::LineTo(PointF::new(w - inset, inset)),
            PathCommand::LineTo(PointF::new(w - inset, h - inset)),
            PathCommand::LineTo(PointF::new(inset, h - inset)),
            PathCommand::Close,
        ];
        layer.items.push(Primitive::path(outline, Style::stroke(ink, 1.0).dashed(6.0, 4.0), Role::Placeholder));
        if w > 0.0 && h > 0.0 && !message.is_empty() {
            layer.items.push(Primitive::text(
                PointF::new(w * 0.5, h * 0.5),
                message,
                13.0,
                TextAnchor::Middle,
                ink,
                Role::Placeholder,
            ));
        }
        scene.layers.push(layer);
        scene
    }

    pub fn push_layer(&mut self, layer: Layer) {
        if !layer.items.is_empty() {
            self.layers.push(layer);
        }
    }

    /// All primitives, in draw order, with their layer translation.
    pub fn primitives(&self) -> impl Iterator<Item = (&Primitive, PointF)> {
        self.layers.iter().flat_map(|l| l.items.iter().map(move |p| (p, l.translate)))
    }

    pub fn with_role(&self, role: Role) -> Vec<&Primitive> {
        self.primitives().filter(|(p, _)| p.role == role).map(|(p, _)| p).collect()
    }

    pub fn count(&self, role: Role) -> usize {
        self.primitives().filter(|(p, _)| p.role == role).count()
    }

    /// True when the scene only contains the empty-state placeholder.
    pub fn is_placeholder(&self) -> bool {
        let mut any = false;
        for (p, _) in self.primitives() {
            if p.role != Role::Placeholder {
                return false;
            }
            any = true;
        }
        any
    }
}
