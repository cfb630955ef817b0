//! Interactive question/answer loop

use std::io::{self, BufRead, Write};

use color_eyre::eyre::Result as EyreResult;
use crossterm::style::Stylize;

use saavy_ear::pool::{interval_name, parse_pitch, pitch_name};
use saavy_ear::{Element, ExerciseKind, PracticeEngine, Repository, SessionRecord};

use super::playback::Player;

enum Input {
    Answer(Element),
    Replay,
    Skip,
    Quit,
    Unknown,
}

fn parse_input(line: &str, exercise: ExerciseKind) -> Input {
    let line = line.trim();
    match line {
        "q" | "quit" => return Input::Quit,
        "r" | "replay" | "" => return Input::Replay,
        "n" | "next" => return Input::Skip,
        _ => {}
    }
    if let Ok(value) = line.parse::<Element>() {
        return Input::Answer(value);
    }

    let named = match exercise {
        ExerciseKind::IntervalComparison => {
            (0..=12).find(|&m| interval_name(m).eq_ignore_ascii_case(line))
        }
        _ => parse_pitch(line),
    };
    named.map_or(Input::Unknown, Input::Answer)
}

fn element_label(element: Element, exercise: ExerciseKind) -> String {
    match exercise {
        ExerciseKind::IntervalComparison => format!("{} ({})", interval_name(element), element),
        _ => pitch_name(element).to_string(),
    }
}

fn present(played: &[Element], exercise: ExerciseKind, player: Option<&Player>) {
    match player {
        Some(player) => {
            let length = player.play(played);
            std::thread::sleep(length);
        }
        None => {
            let names: Vec<String> = played.iter().map(|&e| element_label(e, exercise)).collect();
            println!("  {}", names.join("  ").dark_grey());
        }
    }
}

/// Ask questions until the user quits or input ends
pub fn run<S: Repository>(
    engine: &mut PracticeEngine<S>,
    player: Option<&Player>,
) -> EyreResult<Option<SessionRecord>> {
    let exercise = engine.config().exercise;
    let choices: Vec<String> = engine
        .pool()
        .iter()
        .map(|e| element_label(e, exercise))
        .collect();

    println!("{}", format!("=== saavy-ear: {} ===", exercise.as_str()).bold());
    println!("Answer with: {}", choices.join(", "));
    println!("{}", "Enter replays, n skips, q quits".dark_grey());
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut number = 0;

    'questions: loop {
        number += 1;
        let question = engine.next_question().clone();
        println!("Question {} ({} to answer)", number, question.len());
        present(question.played(), exercise, player);

        loop {
            let position = engine.question().map_or(0, |q| q.position());
            print!("  {}> ", position + 1);
            io::stdout().flush()?;

            let Some(line) = lines.next().transpose()? else {
                println!();
                break 'questions;
            };

            match parse_input(&line, exercise) {
                Input::Quit => break 'questions,
                Input::Replay => present(question.played(), exercise, player),
                Input::Skip => continue 'questions,
                Input::Unknown => println!("  {}", "not an answer".yellow()),
                Input::Answer(element) => {
                    let feedback = engine.answer(element)?;
                    if feedback.check.correct {
                        println!("  {}", "correct".green());
                    } else {
                        println!(
                            "  {} {}",
                            "wrong:".red(),
                            element_label(element, exercise)
                        );
                    }
                    if feedback.question_complete {
                        if let Some(seconds) = feedback.counted_seconds {
                            println!("  {}", format!("done in {seconds}s").dark_grey());
                        }
                        println!();
                        continue 'questions;
                    }
                }
            }
        }
    }

    let record = engine.finish();
    match &record {
        Some(record) => print_summary(record),
        None => println!("No answers, nothing recorded."),
    }
    Ok(record)
}

fn print_summary(record: &SessionRecord) {
    println!();
    println!("{}", "=== Session ===".bold());
    println!(
        "Score: {}% ({}/{})",
        record.score, record.correct_attempts, record.total_attempts
    );
    println!(
        "Questions timed: {} ({:.1}s average)",
        record.answered_questions, record.avg_seconds_per_answer
    );
    println!(
        "Needs practice: {} transitions (severity {})",
        record.needs_practice_count, record.needs_practice_severity
    );
}
