use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::SessionRecord;
use crate::config::Configuration;
use crate::tracking::WeightTable;

/// Questions taking longer than this are treated as the user stepping away
pub const OUTLIER_THRESHOLD: Duration = Duration::from_secs(60);

/// Running counters for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAggregator {
    question_started: Option<Instant>,
    accumulated_seconds: u64,
    answered_questions: u32,
    correct_attempts: u32,
    total_attempts: u32,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_started(&mut self, at: Instant) {
        self.question_started = Some(at);
    }

    /// Close the running question. Returns the whole seconds counted, or
    /// `None` when the time was discarded (outlier, or no start captured).
    pub fn question_completed(&mut self, at: Instant) -> Option<u64> {
        let started = self.question_started.take()?;
        let elapsed = at.saturating_duration_since(started);
        if elapsed > OUTLIER_THRESHOLD {
            debug!(seconds = elapsed.as_secs(), "discarding outlier question time");
            return None;
        }

        let seconds = elapsed.as_secs();
        self.accumulated_seconds += seconds;
        self.answered_questions += 1;
        Some(seconds)
    }

    pub fn record_answer(&mut self, correct: bool) {
        self.total_attempts += 1;
        if correct {
            self.correct_attempts += 1;
        }
    }

    pub fn accumulated_seconds(&self) -> u64 {
        self.accumulated_seconds
    }

    pub fn answered_questions(&self) -> u32 {
        self.answered_questions
    }

    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    /// Current score, `None` before the first attempt
    pub fn score(&self) -> Option<u32> {
        if self.total_attempts == 0 {
            return None;
        }
        let ratio = self.correct_attempts as f64 / self.total_attempts as f64;
        Some((100.0 * ratio).round() as u32)
    }

    /// Build the session record. A session without attempts produces none.
    pub fn finalize(
        &self,
        exercise: &str,
        configuration: &Configuration,
        weights: &WeightTable,
        timestamp: DateTime<Utc>,
    ) -> Option<SessionRecord> {
        let score = self.score()?;
        let avg_seconds_per_answer = if self.answered_questions == 0 {
            0.0
        } else {
            self.accumulated_seconds as f64 / self.answered_questions as f64
        };

        Some(SessionRecord {
            timestamp,
            exercise: exercise.to_string(),
            correct_attempts: self.correct_attempts,
            total_attempts: self.total_attempts,
            score,
            accumulated_seconds: self.accumulated_seconds,
            answered_questions: self.answered_questions,
            avg_seconds_per_answer,
            needs_practice_count: weights.len(),
            needs_practice_severity: weights.total_severity(),
            configuration: configuration.clone(),
        })
    }
}
