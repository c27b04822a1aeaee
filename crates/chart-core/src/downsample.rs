// File: crates/chart-core/src/downsample.rs
// Summary: Largest-Triangle-Three-Buckets reduction for dense trendlines.

/// Reduce `points` to at most `threshold` points, preserving visual shape.
///
/// The first and last points are always kept; each interior bucket keeps the
/// point forming the largest triangle with the previously kept point and the
/// average of the following bucket.
pub fn lttb(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if threshold == 0 || n == 0 {
        return Vec::new();
    }
    if threshold >= n || n <= 2 {
        return points.to_vec();
    }
    if threshold == 1 {
        return vec![points[0]];
    }
    if threshold == 2 {
        return vec![points[0], points[n - 1]];
    }

    let buckets = threshold - 2;
    let width = (n - 2) as f64 / buckets as f64;
    // bucket i covers [bounds(i), bounds(i + 1)) over the interior points
    let bounds = |i: usize| -> usize { ((1.0 + i as f64 * width).floor() as usize).min(n - 1) };

    let mut kept = Vec::with_capacity(threshold);
    kept.push(points[0]);
    let mut anchor = points[0];

    for i in 0..buckets {
        let (start, end) = (bounds(i), bounds(i + 1).max(bounds(i) + 1));

        let next = &points[end.min(n - 1)..bounds(i + 2).max(end + 1).min(n)];
        let (avg_x, avg_y) = if next.is_empty() {
            points[n - 1]
        } else {
            let sum = next.iter().fold((0.0, 0.0), |acc, p| (acc.0 + p.0, acc.1 + p.1));
            (sum.0 / next.len() as f64, sum.1 / next.len() as f64)
        };

        let chosen = points[start..end.min(n - 1).max(start + 1)]
            .iter()
            .copied()
            .map(|p| {
                let area = ((anchor.0 - p.0) * (avg_y - anchor.1) - (anchor.0 - avg_x) * (p.1 - anchor.1)).abs();
                (p, area)
            })
            .fold(None::<((f64, f64), f64)>, |best, cand| match best {
                Some((_, a)) if a >= cand.1 => best,
                _ => Some(cand),
            })
            .map(|(p, _)| p)
            .unwrap_or(points[start]);

        kept.push(chosen);
        anchor = chosen;
    }

    kept.push(points[n - 1]);
    kept
}
