// File: crates/chart-core/src/svg.rs
// Summary: Serializes a Scene to a standalone SVG document.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::scene::{PathCommand, Primitive, Rgba, Scene, Shape, Style, TextAnchor};

/// SVG text for `scene`; layers become translated `<g>` groups.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(scene.width),
        h = num(scene.height)
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, scene.background.hex());
    for layer in &scene.layers {
        let _ = writeln!(
            out,
            r#"<g class="{}" transform="translate({},{})">"#,
            layer.name,
            num(layer.translate.x),
            num(layer.translate.y)
        );
        for p in &layer.items {
            out.push_str(&primitive(p));
            out.push('\n');
        }
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    out
}

/// Write `to_svg(scene)` to `path`, creating parent directories.
pub fn render_to_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg(scene))?;
    Ok(())
}

fn primitive(p: &Primitive) -> String {
    let style = style_attrs(&p.style);
    let entity = p.entity.as_ref().map(|e| format!(r#" data-entity="{}""#, escape(e.as_str()))).unwrap_or_default();
    match &p.shape {
        Shape::Line { from, to } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{style}{entity}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        ),
        Shape::Rect(r) => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{style}{entity}/>"#,
            num(r.left),
            num(r.top),
            num(r.width),
            num(r.height)
        ),
        Shape::Circle { center, radius } => format!(
            r#"<circle cx="{}" cy="{}" r="{}"{style}{entity}/>"#,
            num(center.x),
            num(center.y),
            num(*radius)
        ),
        Shape::Path(commands) => format!(r#"<path d="{}"{style}{entity}/>"#, path_data(commands)),
        Shape::Text { at, content, size, anchor } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" text-anchor="{anchor}"{style}{entity}>{}</text>"#,
                num(at.x),
                num(at.y),
                num(*size),
                escape(content)
            )
        }
    }
}

pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for c in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match c {
            PathCommand::MoveTo(p) => {
                let _ = write!(d, "M{},{}", num(p.x), num(p.y));
            }
            PathCommand::LineTo(p) => {
                let _ = write!(d, "L{},{}", num(p.x), num(p.y));
            }
            PathCommand::CubicTo(c1, c2, p) => {
                let _ = write!(d, "C{},{} {},{} {},{}", num(c1.x), num(c1.y), num(c2.x), num(c2.y), num(p.x), num(p.y));
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

fn style_attrs(style: &Style) -> String {
    let mut s = String::new();
    match style.fill {
        Some(c) => paint(&mut s, "fill", c),
        None => s.push_str(r#" fill="none""#),
    }
    if let Some(c) = style.stroke {
        paint(&mut s, "stroke", c);
        let _ = write!(s, r#" stroke-width="{}""#, num(style.stroke_width));
        if let Some((on, off)) = style.dash {
            let _ = write!(s, r#" stroke-dasharray="{},{}""#, num(on), num(off));
        }
    }
    s
}

fn paint(s: &mut String, attr: &str, c: Rgba) {
    let _ = write!(s, r#" {attr}="{}""#, c.hex());
    if c.a < 255 {
        let _ = write!(s, r#" {attr}-opacity="{:.3}""#, c.a as f32 / 255.0);
    }
}

/// Two decimals, trailing zeros trimmed.
fn num(v: f32) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
