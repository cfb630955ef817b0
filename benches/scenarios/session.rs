//! Benchmarks for complete question/answer loops.
//!
//! Every answer saves both tables, so these include JSON encoding through an
//! in-memory repository.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use saavy_ear::{
    Configuration, ExerciseKind, KeyValueRepository, ManualClock, MemoryStore, PracticeEngine,
};

pub fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/session");

    for exercise in [ExerciseKind::Melodic, ExerciseKind::IntervalComparison] {
        let config = Configuration {
            exercise,
            elements_per_question: 4,
            ..Configuration::default()
        };
        let mut engine = PracticeEngine::start(
            config,
            KeyValueRepository::new(MemoryStore::new()),
            StdRng::seed_from_u64(11),
            ManualClock::new(chrono::Utc::now()),
        )
        .unwrap();

        // One wrong and then every right answer per question
        group.bench_with_input(
            BenchmarkId::new("question", exercise.as_str()),
            &exercise,
            |b, _| {
                b.iter(|| {
                    let answers = engine.next_question().answers().to_vec();
                    let _ = engine.answer(black_box(answers[0] + 1));
                    for answer in answers {
                        let _ = engine.answer(black_box(answer));
                    }
                })
            },
        );
    }

    group.finish();
}
