//! Benchmarks for needs-practice table updates and weighted sampling.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use saavy_ear::pool::{build_pool, ElementRange};
use saavy_ear::tracking::{PairKey, WeightTable};

use crate::TABLE_SIZES;

/// Table with `size` keys spread across the pool's transitions
fn filled_table(pool: &[i32], size: usize) -> WeightTable {
    let mut table = WeightTable::new(10);
    let mut n = 0;
    'fill: for &previous in pool {
        for &current in pool {
            if n == size {
                break 'fill;
            }
            let key = PairKey::new(Some(previous), current);
            for _ in 0..(n % 4) + 1 {
                table.record_failure(key, PairKey::opening(current));
            }
            n += 1;
        }
    }
    table
}

pub fn bench_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("practice/weights");
    let pool = build_pool((0..12).collect::<Vec<_>>(), ElementRange::new(-24, 24), 12);
    let mut rng = StdRng::seed_from_u64(42);

    for &size in TABLE_SIZES {
        let table = filled_table(pool.as_slice(), size);
        let previous = pool.as_slice().first().copied();

        group.bench_with_input(BenchmarkId::new("sample_weighted", size), &size, |b, _| {
            b.iter(|| table.sample_weighted(black_box(previous), black_box(&pool), &mut rng))
        });

        group.bench_with_input(BenchmarkId::new("record_failure", size), &size, |b, _| {
            let mut table = table.clone();
            let key = PairKey::new(Some(0), 7);
            b.iter(|| table.record_failure(black_box(key), black_box(PairKey::new(Some(0), 5))))
        });

        group.bench_with_input(BenchmarkId::new("entries", size), &size, |b, _| {
            b.iter(|| black_box(table.entries()))
        });
    }

    group.finish();
}
