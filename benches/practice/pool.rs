//! Benchmarks for pool construction.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_ear::pool::{build_pool, ElementRange};

pub fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("practice/pool");

    let major = [0, 2, 4, 5, 7, 9, 11];
    let chromatic: Vec<i32> = (0..12).collect();

    // Range span in octaves either side of 0
    for &octaves in &[1, 2, 4] {
        let range = ElementRange::new(-12 * octaves, 12 * octaves);

        group.bench_with_input(BenchmarkId::new("major", octaves), &range, |b, &range| {
            b.iter(|| build_pool(black_box(major), black_box(range), 12))
        });

        group.bench_with_input(BenchmarkId::new("chromatic", octaves), &range, |b, &range| {
            b.iter(|| build_pool(black_box(chromatic.iter().copied()), black_box(range), 12))
        });
    }

    group.finish();
}
