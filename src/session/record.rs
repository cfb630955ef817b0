use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Configuration;

/// Snapshot of one completed practice session.
///
/// Created once by [`super::SessionAggregator::finalize`] and appended to the
/// session log; nothing updates a record afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    /// Exercise label, e.g. "melodic"
    pub exercise: String,
    pub correct_attempts: u32,
    pub total_attempts: u32,
    /// round(100 × correct / total)
    pub score: u32,
    /// Question time with outliers discarded
    pub accumulated_seconds: u64,
    /// Questions whose time was counted
    pub answered_questions: u32,
    pub avg_seconds_per_answer: f64,
    /// Distinct needs-practice entries at session end
    pub needs_practice_count: usize,
    /// Sum of their severities
    pub needs_practice_severity: u32,
    pub configuration: Configuration,
}

impl SessionRecord {
    /// Fraction of attempts that were correct (0.0 - 1.0)
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        self.correct_attempts as f64 / self.total_attempts as f64
    }
}
