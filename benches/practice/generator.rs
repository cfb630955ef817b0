//! Benchmarks for sequence generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use saavy_ear::config::IntervalSettings;
use saavy_ear::generator::{IntervalGenerator, SequenceGenerator};
use saavy_ear::pool::{build_pool, ElementRange};
use saavy_ear::tracking::{PairKey, WeightTable};

pub fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("practice/generator");
    let pool = build_pool([0, 2, 4, 5, 7, 9, 11], ElementRange::new(-12, 24), 12);
    let adjacency = ElementRange::new(1, 7);
    let mut rng = StdRng::seed_from_u64(7);

    let mut busy = WeightTable::new(10);
    for &e in pool.as_slice() {
        busy.record_failure(PairKey::new(Some(e), e + 2), PairKey::opening(e));
    }

    for &length in &[3usize, 8, 16] {
        let mut generator = SequenceGenerator::new();
        let quiet = WeightTable::default();
        group.bench_with_input(BenchmarkId::new("melodic_quiet", length), &length, |b, &length| {
            b.iter(|| generator.generate(&pool, &quiet, adjacency, black_box(length), &mut rng))
        });

        let mut generator = SequenceGenerator::new();
        group.bench_with_input(BenchmarkId::new("melodic_busy", length), &length, |b, &length| {
            b.iter(|| generator.generate(&pool, &busy, adjacency, black_box(length), &mut rng))
        });

        let mut intervals = IntervalGenerator::new();
        let settings = IntervalSettings::default();
        group.bench_with_input(BenchmarkId::new("interval", length), &length, |b, &length| {
            b.iter(|| intervals.generate(&settings, black_box(length), &mut rng))
        });
    }

    group.finish();
}
