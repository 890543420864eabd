//! Criterion micro-benchmarks for the multiplier lookup hot path.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use multregt_bench::{connection_sample, reference_dims, reference_scanner};
use multregt_core::GridDims;
use multregt_scanner::MultRegtScanner;
use multregt_test_utils::MockRegionProperties;

/// Benchmark: 100K connections against the reference scanner.
fn bench_multiplier_sweep(c: &mut Criterion) {
    let scanner = reference_scanner(42).unwrap();
    let sample = connection_sample(reference_dims(), 100_000, 7);

    let mut group = c.benchmark_group("multiplier");
    group.throughput(Throughput::Elements(sample.len() as u64));
    group.bench_function("sweep_100k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(x, y, conn) in &sample {
                acc += scanner.multiplier(x, y, conn);
            }
            black_box(acc);
        });
    });
    group.finish();
}

/// Benchmark: the same sweep with no rules, the common case for most decks.
fn bench_multiplier_empty(c: &mut Criterion) {
    let dims: GridDims = reference_dims();
    let props = MockRegionProperties::new(dims);
    let scanner = MultRegtScanner::from_records(&props, vec![], "FLUXNUM").unwrap();
    let sample = connection_sample(dims, 100_000, 7);

    c.bench_function("multiplier_empty_100k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(x, y, conn) in &sample {
                acc += scanner.multiplier(x, y, conn);
            }
            black_box(acc);
        });
    });
}

criterion_group!(benches, bench_multiplier_sweep, bench_multiplier_empty);
criterion_main!(benches);
