// File: crates/chart-core/src/curve.rs
// Summary: Monotone cubic interpolation (Fritsch-Carlson tangents) emitted as bezier path commands.
// Notes:
// - Tangents are zero at local extrema and bounded by 3x the secant slope, so each
//   segment stays inside the y-range of its two endpoints (no overshoot).

use tracing::warn;

use crate::geometry::PointF;
use crate::scene::PathCommand;

/// Smooth path through `points` (pixel space, x strictly increasing).
///
/// Points that are non-finite or do not advance in x are dropped.
pub fn monotone_x(points: &[PointF]) -> Vec<PathCommand> {
    let pts = sanitize(points);
    let mut out = Vec::with_capacity(pts.len() + 1);
    let Some(&first) = pts.first() else { return out };
    out.push(PathCommand::MoveTo(first));
    if pts.len() <= 2 {
        out.extend(pts.get(1).map(|&p| PathCommand::LineTo(p)));
        return out;
    }
    let tangents = tangents(&pts);
    for i in 0..pts.len().saturating_sub(1) {
        let (p0, p1) = (pts[i], pts[i + 1]);
        let h = p1.x - p0.x;
        let c1 = PointF::new(p0.x + h / 3.0, p0.y + tangents[i] * h / 3.0);
        let c2 = PointF::new(p1.x - h / 3.0, p1.y - tangents[i + 1] * h / 3.0);
        out.push(PathCommand::CubicTo(c1, c2, p1));
    }
    out
}

/// Closed area between the smoothed curve and the horizontal line `baseline_y`.
pub fn monotone_area(points: &[PointF], baseline_y: f32) -> Vec<PathCommand> {
    let mut out = monotone_x(points);
    // a lone move encloses nothing
    if out.len() < 2 {
        return Vec::new();
    }
    let (first, last) = match (out.first(), out.last()) {
        (Some(PathCommand::MoveTo(f)), Some(last)) => (*f, end_point(last).unwrap_or(*f)),
        _ => return out,
    };
    out.push(PathCommand::LineTo(PointF::new(last.x, baseline_y)));
    out.push(PathCommand::LineTo(PointF::new(first.x, baseline_y)));
    out.push(PathCommand::Close);
    out
}

/// Approximate a path with line segments (`steps` per cubic).
pub fn flatten(commands: &[PathCommand], steps: usize) -> Vec<PointF> {
    let steps = steps.max(1);
    let mut out = Vec::new();
    let mut cursor: Option<PointF> = None;
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                out.push(p);
                cursor = Some(p);
            }
            PathCommand::CubicTo(c1, c2, p) => {
                let p0 = cursor.unwrap_or(c1);
                for k in 1..=steps {
                    out.push(cubic_at(p0, c1, c2, p, k as f32 / steps as f32));
                }
                cursor = Some(p);
            }
            PathCommand::Close => {}
        }
    }
    out
}

pub fn cubic_at(p0: PointF, c1: PointF, c2: PointF, p1: PointF, t: f32) -> PointF {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    PointF::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

fn end_point(cmd: &PathCommand) -> Option<PointF> {
    match *cmd {
        PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => Some(p),
        PathCommand::Close => None,
    }
}

fn sanitize(points: &[PointF]) -> Vec<PointF> {
    let mut out: Vec<PointF> = Vec::with_capacity(points.len());
    let mut dropped = 0usize;
    for &p in points {
        if !p.x.is_finite() || !p.y.is_finite() {
            dropped += 1;
            continue;
        }
        if let Some(prev) = out.last() {
            if p.x <= prev.x {
                dropped += 1;
                continue;
            }
        }
        out.push(p);
    }
    if dropped > 0 {
        warn!(dropped, "curve points dropped (non-finite or non-increasing x)");
    }
    out
}

fn tangents(pts: &[PointF]) -> Vec<f32> {
    let n = pts.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let secants: Vec<f32> = pts.windows(2).map(|w| (w[1].y - w[0].y) / (w[1].x - w[0].x)).collect();
    let mut m = vec![0.0f32; n];
    m[0] = secants[0];
    m[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        let (d0, d1) = (secants[i - 1], secants[i]);
        if d0 * d1 <= 0.0 {
            continue;
        }
        let h0 = pts[i].x - pts[i - 1].x;
        let h1 = pts[i + 1].x - pts[i].x;
        // weighted harmonic mean of the neighbouring secants
        m[i] = 3.0 * (h0 + h1) / ((2.0 * h1 + h0) / d0 + (h1 + 2.0 * h0) / d1);
    }
    m
}
