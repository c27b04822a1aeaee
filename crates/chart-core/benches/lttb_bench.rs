// File: crates/chart-core/benches/lttb_bench.rs
// Summary: LTTB reduction of dense ecological-inference trendlines.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ensemble_chart_core::downsample::lttb;
use ensemble_chart_core::series::TrendlineSeries;

fn gen_trend(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let x = i as f64 / (n - 1) as f64;
            // logistic vote share over group share with a little ripple
            let y = 1.0 / (1.0 + (-8.0 * (x - 0.5)).exp()) + (i as f64 * 0.05).sin() * 0.01;
            (x, y)
        })
        .collect()
}

fn bench_lttb(c: &mut Criterion) {
    let mut group = c.benchmark_group("lttb");
    for &n in &[10_000usize, 100_000usize] {
        let data = gen_trend(n);
        for &target in &[500usize, 2_000usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_t{target}")), &target, |b, &t| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(lttb(&d, t)); },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_trendline(c: &mut Criterion) {
    let series = TrendlineSeries::new("fit", gen_trend(50_000));
    c.bench_function("trendline_downsample_50k", |b| b.iter(|| black_box(series.downsample(1_000))));
}

criterion_group!(benches, bench_lttb, bench_trendline);
criterion_main!(benches);
