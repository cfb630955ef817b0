use std::time::Duration;

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use saavy_ear::generator::PickReason;
use saavy_ear::pool::canonical;
use saavy_ear::tracking::PairKey;
use saavy_ear::{
    Configuration, DirectionPolicy, ElementRange, ExerciseKind, IntervalSettings,
    KeyValueRepository, ManualClock, MemoryStore, PracticeEngine, ScriptedRandom,
};

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 14, 18, 0, 0).unwrap())
}

#[test]
fn melodic_questions_respect_adjacency_and_opening() {
    let config = Configuration {
        base_elements: vec![0, 2, 4, 5, 7, 9, 11],
        range: ElementRange::new(0, 11),
        adjacency: ElementRange::new(1, 11),
        elements_per_question: 3,
        ..Configuration::default()
    };
    let mut engine = PracticeEngine::start(
        config,
        KeyValueRepository::new(MemoryStore::new()),
        StdRng::seed_from_u64(2024),
        clock(),
    )
    .unwrap();
    assert_eq!(engine.pool().as_slice(), &[0, 2, 4, 5, 7, 9, 11]);

    let mut previous_opening = None;
    for _ in 0..1000 {
        let played = engine.next_question().played().to_vec();
        assert_eq!(played.len(), 3);
        for pair in played.windows(2) {
            let distance = (pair[1] - pair[0]).abs();
            assert!((1..=11).contains(&distance), "{played:?} breaks adjacency");
        }
        assert_ne!(Some(played[0]), previous_opening);
        previous_opening = Some(played[0]);
    }
}

#[test]
fn mistakes_steer_later_questions() {
    let mut engine = PracticeEngine::start(
        Configuration::default(),
        KeyValueRepository::new(MemoryStore::new()),
        StdRng::seed_from_u64(5),
        clock(),
    )
    .unwrap();

    // Miss every opening a few times so the table fills up
    for _ in 0..10 {
        let expected = engine.next_question().expected().unwrap();
        let wrong = engine
            .pool()
            .iter()
            .find(|&e| canonical(e, 12) != canonical(expected, 12))
            .unwrap();
        engine.answer(wrong).unwrap();
    }
    assert!(!engine.weights().is_empty());
    for (_, severity) in engine.weights().iter() {
        assert!((1..=10).contains(&severity));
    }

    let mut weighted = 0;
    for _ in 0..200 {
        engine.next_question();
        weighted += engine
            .pick_reasons()
            .iter()
            .filter(|&&r| r == PickReason::NeedsPractice)
            .count();
    }
    assert!(weighted > 0);
}

#[test]
fn scripted_session_is_reproducible() {
    let run = || {
        let mut engine = PracticeEngine::start(
            Configuration::default(),
            KeyValueRepository::new(MemoryStore::new()),
            ScriptedRandom::new([0.1, 0.8, 0.35, 0.6, 0.95, 0.05]),
            clock(),
        )
        .unwrap();
        (0..5)
            .map(|_| engine.next_question().played().to_vec())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn full_session_produces_record() {
    let clock = clock();
    let mut engine = PracticeEngine::start(
        Configuration::default(),
        KeyValueRepository::new(MemoryStore::new()),
        StdRng::seed_from_u64(99),
        clock.clone(),
    )
    .unwrap();

    // Question 1: one slip, finished in 12 seconds
    let answers = engine.next_question().answers().to_vec();
    let slip = engine
        .pool()
        .iter()
        .find(|&e| canonical(e, 12) != canonical(answers[0], 12))
        .unwrap();
    engine.answer(slip).unwrap();
    clock.advance(Duration::from_secs(12));
    for &answer in &answers {
        engine.answer(answer).unwrap();
    }

    // Question 2: user walked away
    let answers = engine.next_question().answers().to_vec();
    clock.advance(Duration::from_secs(70));
    for &answer in &answers {
        engine.answer(answer).unwrap();
    }

    let record = engine.finish().unwrap();
    assert_eq!(record.total_attempts, 7);
    assert_eq!(record.correct_attempts, 6);
    assert_eq!(record.score, 86);
    assert_eq!(record.accumulated_seconds, 12);
    assert_eq!(record.answered_questions, 1);
    assert_eq!(record.avg_seconds_per_answer, 12.0);
    assert_eq!(record.exercise, "melodic");
    assert_eq!(record.needs_practice_count, engine.weights().len());
    assert_eq!(record.needs_practice_severity, engine.weights().total_severity());
    assert_eq!(engine.confusions().count(slip, answers[0]), 1);
    assert_eq!(
        engine.weights().severity(PairKey::opening(answers[0])),
        2,
        "escalated to 3, then one success"
    );
}

#[test]
fn interval_questions_hold_one_target_and_never_repeat() {
    let config = Configuration {
        exercise: ExerciseKind::IntervalComparison,
        elements_per_question: 4,
        intervals: IntervalSettings {
            targets: vec![5, -7],
            comparison: ElementRange::new(1, 12),
            include_target: false,
            direction: DirectionPolicy::Random,
        },
        ..Configuration::default()
    };
    let mut engine = PracticeEngine::start(
        config,
        KeyValueRepository::new(MemoryStore::new()),
        StdRng::seed_from_u64(31),
        clock(),
    )
    .unwrap();

    let mut previous = None;
    for _ in 0..500 {
        engine.next_question();
        let sequence = engine.interval_sequence().unwrap().clone();
        assert!(sequence.target == 5 || sequence.target == 7);
        assert_eq!(sequence.offsets[0], 0);
        assert_eq!(sequence.magnitudes.len(), 3);
        let targets = sequence
            .magnitudes
            .iter()
            .filter(|&&m| m == sequence.target)
            .count();
        assert_eq!(targets, 1);
        assert_eq!(sequence.magnitudes[sequence.target_step], sequence.target);

        let signature = (sequence.direction, sequence.magnitudes.clone());
        assert_ne!(Some(&signature), previous.as_ref());
        previous = Some(signature);
    }
}
