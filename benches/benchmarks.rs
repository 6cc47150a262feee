//! Benchmarks for watchstats primitives
//!
//! Run with: cargo bench

// Require all features for benchmarks
#[cfg(not(all(
    feature = "sampling",
    feature = "window",
    feature = "averages",
    feature = "correlation"
)))]
compile_error!("Benchmarks require all algorithm families. Run: cargo bench");

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use watchstats::averages::ExponentialMovingAverage;
use watchstats::correlation::OnlineCorrelation;
use watchstats::sampling::Reservoir;
use watchstats::traits::{ReduceOperation, Reducible};
use watchstats::window::TimeWindowAccumulator;

// ============================================================================
// Reservoir Benchmarks
// ============================================================================

fn bench_reservoir(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservoir");
    group.throughput(Throughput::Elements(1));

    for capacity in [100, 1000, 10000] {
        group.bench_function(format!("add_cap{}", capacity), |b| {
            let mut reservoir = Reservoir::<u64>::with_seed(capacity, 42).unwrap();
            let mut i = 0u64;
            b.iter(|| {
                // Scrambled so replacements land all over the sorted view
                reservoir.add(i.wrapping_mul(0x9e3779b97f4a7c15));
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("quantile", |b| {
        let mut reservoir = Reservoir::<f64>::with_seed(1000, 42).unwrap();
        for i in 0..100_000u64 {
            reservoir.add(i as f64);
        }
        b.iter(|| black_box(reservoir.quantile(black_box(0.99))));
    });

    group.bench_function("fraction_at_least", |b| {
        let mut reservoir = Reservoir::<f64>::with_seed(1000, 42).unwrap();
        for i in 0..100_000u64 {
            reservoir.add(i as f64);
        }
        b.iter(|| black_box(reservoir.fraction_at_least(black_box(50_000.0))));
    });

    group.bench_function("apply_as_double_mean", |b| {
        let mut reservoir = Reservoir::<f64>::with_seed(1000, 42).unwrap();
        for i in 0..100_000u64 {
            reservoir.add(i as f64);
        }
        b.iter(|| black_box(reservoir.apply_as_double(ReduceOperation::Mean)));
    });

    group.finish();
}

// ============================================================================
// Accumulator Benchmarks
// ============================================================================

fn bench_accumulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_window_accumulator");
    group.throughput(Throughput::Elements(1));

    group.bench_function("adder_update", |b| {
        let mut acc = TimeWindowAccumulator::adder(0u64, Duration::from_secs(1)).unwrap();
        b.iter(|| black_box(acc.update(black_box(1))));
    });

    group.bench_function("peak_update", |b| {
        let mut acc = TimeWindowAccumulator::peak(0.0f64, Duration::from_secs(1)).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            black_box(acc.update((i % 1000) as f64));
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

// ============================================================================
// EMA Benchmarks
// ============================================================================

fn bench_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("ema");
    group.throughput(Throughput::Elements(1));

    group.bench_function("accept", |b| {
        let mut avg = ExponentialMovingAverage::new(Duration::from_secs(60)).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            avg.accept(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

// ============================================================================
// Correlation Benchmarks
// ============================================================================

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("apply", |b| {
        let mut corr = OnlineCorrelation::new();
        let mut i = 0u64;
        b.iter(|| {
            let x = i as f64;
            black_box(corr.apply(x, x * 0.5 + (i % 7) as f64));
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("coefficient", |b| {
        let mut corr = OnlineCorrelation::new();
        for i in 0..100_000u64 {
            corr.apply(i as f64, (i * 3 % 101) as f64);
        }
        b.iter(|| black_box(corr.coefficient()));
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_reservoir,
    bench_accumulator,
    bench_ema,
    bench_correlation,
);

criterion_main!(benches);
