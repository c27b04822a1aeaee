// File: crates/chart-core/src/grid.rs
// Summary: Evenly spaced sample grids (histogram bin edges, synthetic x grids).

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps as f64 - 1.0);
            (0..steps).map(|i| if i + 1 == steps { end } else { start + step * i as f64 }).collect()
        }
    }
}

/// Midpoints between consecutive `edges`.
pub fn centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}
