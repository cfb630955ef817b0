//! History and configuration listings

use crossterm::style::Stylize;

use saavy_ear::pool::{interval_name, pitch_name};
use saavy_ear::tracking::PairKey;
use saavy_ear::{Configuration, Element, ExerciseKind, PracticeEngine, Repository};

const SHOWN_SESSIONS: usize = 10;
const SHOWN_PAIRS: usize = 5;

fn name(element: Element, exercise: ExerciseKind) -> &'static str {
    match exercise {
        ExerciseKind::IntervalComparison => interval_name(element),
        _ => pitch_name(element),
    }
}

fn key_label(key: PairKey, exercise: ExerciseKind) -> String {
    match key.previous {
        Some(previous) => format!(
            "{} -> {}",
            name(previous, exercise),
            name(key.current, exercise)
        ),
        None => format!("(start) {}", name(key.current, exercise)),
    }
}

pub fn print_history<S: Repository>(engine: &PracticeEngine<S>) {
    let exercise = engine.config().exercise;
    let sessions = engine.history();

    println!("{}", "=== Sessions ===".bold());
    if sessions.is_empty() {
        println!("  none yet");
    }
    let skip = sessions.len().saturating_sub(SHOWN_SESSIONS);
    for record in sessions.iter().skip(skip) {
        println!(
            "  {}  {:<20} {:>3}%  {:>3}/{:<3}  {:>5.1}s",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.exercise,
            record.score,
            record.correct_attempts,
            record.total_attempts,
            record.avg_seconds_per_answer,
        );
    }

    println!();
    println!("{}", format!("=== Hardest ({}) ===", exercise.as_str()).bold());
    for (key, severity) in engine.weights().hardest(SHOWN_PAIRS) {
        println!("  {:<16} {}", key_label(key, exercise), severity);
    }

    println!();
    println!("{}", "=== Most confused ===".bold());
    for (pair, count) in engine.confusions().most_confused(SHOWN_PAIRS) {
        println!(
            "  {} / {:<8} {}",
            name(pair.lo(), exercise),
            name(pair.hi(), exercise),
            count
        );
    }
}

pub fn print_config<S: Repository>(engine: &PracticeEngine<S>) {
    let config: &Configuration = engine.config();
    let query = config.to_query();
    println!("exercise: {}", config.exercise.as_str());
    println!(
        "query:    {}",
        if query.is_empty() { "(defaults)" } else { query.as_str() }
    );
    let pool: Vec<String> = engine
        .pool()
        .iter()
        .map(|e| format!("{}={}", e, name(e, config.exercise)))
        .collect();
    println!("pool:     {}", pool.join(" "));
}
