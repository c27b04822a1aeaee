// File: crates/chart-render-skia/src/lib.rs
// Summary: Rasterizes core scenes on a CPU Skia surface to RGBA buffers and PNG files.
// Notes:
// - Layers are drawn in order, each inside a save/translate/restore pair.
// - Styles fill first, then stroke, matching the SVG export.

pub mod text;

use anyhow::{anyhow, Result};
use ensemble_chart_core::scene::{Layer, PathCommand, Primitive, Rgba, Role, Scene, Shape, Style};
use skia_safe as skia;
use tracing::debug;

use crate::text::TextShaper;

#[derive(Default)]
pub struct SkiaRenderer {
    text: TextShaper,
}

impl SkiaRenderer {
    pub fn new() -> Self { Self { text: TextShaper::new() } }

    /// Draw `scene` onto an existing canvas (origin at the scene's top-left).
    pub fn draw(&self, canvas: &skia::Canvas, scene: &Scene) {
        canvas.clear(color(scene.background));
        for layer in &scene.layers {
            self.draw_layer(canvas, layer);
        }
    }

    /// Render into a tightly packed RGBA8 buffer: `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, scene: &Scene) -> Result<(Vec<u8>, i32, i32, usize)> {
        let (w, h) = surface_size(scene)?;
        let mut surface = self.raster(scene, w, h)?;
        let stride = w as usize * 4;
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("failed to read back {w}x{h} surface pixels"));
        }
        Ok((pixels, w, h, stride))
    }

    pub fn render_to_png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let (w, h) = surface_size(scene)?;
        let mut surface = self.raster(scene, w, h)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render `scene` to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(scene)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        debug!(path = %path.display(), "png written");
        Ok(())
    }

    fn raster(&self, scene: &Scene, w: i32, h: i32) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        self.draw(surface.canvas(), scene);
        Ok(surface)
    }

    fn draw_layer(&self, canvas: &skia::Canvas, layer: &Layer) {
        canvas.save();
        canvas.translate((layer.translate.x, layer.translate.y));
        for p in &layer.items {
            self.draw_primitive(canvas, p);
        }
        canvas.restore();
    }

    fn draw_primitive(&self, canvas: &skia::Canvas, p: &Primitive) {
        let style = &p.style;
        match &p.shape {
            Shape::Line { from, to } => {
                // a line has no interior; fall back to the fill color when unstroked
                let ink = style.stroke.or(style.fill);
                if let Some(paint) = ink.map(|c| stroke_paint(c, style)) {
                    canvas.draw_line((from.x, from.y), (to.x, to.y), &paint);
                }
            }
            Shape::Rect(r) => {
                let rect = skia::Rect::from_xywh(r.left, r.top, r.width, r.height);
                for paint in paints(style) {
                    canvas.draw_rect(rect, &paint);
                }
            }
            Shape::Circle { center, radius } => {
                for paint in paints(style) {
                    canvas.draw_circle((center.x, center.y), *radius, &paint);
                }
            }
            Shape::Path(commands) => {
                let path = to_path(commands);
                for paint in paints(style) {
                    canvas.draw_path(&path, &paint);
                }
            }
            Shape::Text { at, content, size, anchor } => {
                let Some(ink) = style.fill else { return };
                let mono = p.role == Role::TickLabel;
                self.text.draw_anchored(canvas, content, at.x, at.y, *size, color(ink), *anchor, mono);
            }
        }
    }
}

fn surface_size(scene: &Scene) -> Result<(i32, i32)> {
    let (w, h) = (scene.width.round() as i32, scene.height.round() as i32);
    if w <= 0 || h <= 0 {
        return Err(anyhow!("scene has no drawable area ({w}x{h})"));
    }
    Ok((w, h))
}

fn color(c: Rgba) -> skia::Color { skia::Color::from_argb(c.a, c.r, c.g, c.b) }

fn fill_paint(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c));
    paint
}

fn stroke_paint(c: Rgba, style: &Style) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(style.stroke_width.max(0.0));
    paint.set_color(color(c));
    if let Some((on, off)) = style.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    }
    paint
}

/// Fill paint (if any) followed by stroke paint (if any).
fn paints(style: &Style) -> Vec<skia::Paint> {
    let mut out = Vec::with_capacity(2);
    if let Some(c) = style.fill {
        out.push(fill_paint(c));
    }
    if let Some(c) = style.stroke.filter(|_| style.stroke_width > 0.0) {
        out.push(stroke_paint(c, style));
    }
    out
}

fn to_path(commands: &[PathCommand]) -> skia::Path {
    let mut path = skia::Path::new();
    for c in commands {
        match *c {
            PathCommand::MoveTo(p) => {
                path.move_to((p.x, p.y));
            }
            PathCommand::LineTo(p) => {
                path.line_to((p.x, p.y));
            }
            PathCommand::CubicTo(c1, c2, p) => {
                path.cubic_to((c1.x, c1.y), (c2.x, c2.y), (p.x, p.y));
            }
            PathCommand::Close => {
                path.close();
            }
        }
    }
    path
}
