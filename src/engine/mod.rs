/*
Practice Engine
===============

One `PracticeEngine` owns everything a session touches: the pool, both
tracking tables, the generators, the aggregator and the injected
repository, random source and clock. Nothing is global.

    start(config)          validate, build pool, load tables
      │
      ▼
    next_question() ───────► Question (played elements, scored answers)
      │                         │
      │        answer(e) ◄──────┘   per position, until complete
      │          ├─ aggregator.record_answer
      │          ├─ success: weights.record_success
      │          ├─ failure: weights.record_failure + confusions.record_confusion
      │          ├─ save both tables
      │          └─ complete: aggregator.question_completed
      ▼
    finish() ──────────────► SessionRecord, appended to the log

Asking for a new question discards the one in progress. A failed save is
logged and the in-memory tables stay authoritative.

Exercises:
- Melodic: `elements_per_question` scored pitches plus `extra_elements`
  unscored trailing pitches
- SingleNote: one pitch, answered once
- IntervalComparison: answers are the step magnitudes of an
  `IntervalGenerator` melody, compared exactly
*/

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{Configuration, ExerciseKind};
use crate::error::{EngineError, Result};
use crate::generator::{
    AnswerCheck, IntervalGenerator, IntervalSequence, PickReason, Question, SequenceGenerator,
};
use crate::pool::{Element, Pool};
use crate::random::RandomSource;
use crate::session::{Clock, SessionAggregator, SessionRecord, SystemClock};
use crate::store::{confusions_table, needs_practice_table, Repository};
use crate::tracking::{ConfusionTable, WeightTable};

/// Result of one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub check: AnswerCheck,
    /// The answer finished the question
    pub question_complete: bool,
    /// Seconds added to the session total when the question finished
    /// (`None` while in progress, or when the time was discarded)
    pub counted_seconds: Option<u64>,
}

/// Details of the question in progress
#[derive(Debug, Clone)]
struct ActiveQuestion {
    question: Question,
    reasons: Vec<PickReason>,
    interval: Option<IntervalSequence>,
}

/// Adaptive practice session
pub struct PracticeEngine<S: Repository, R: RandomSource = StdRng, C: Clock = SystemClock> {
    config: Configuration,
    pool: Pool,
    weights: WeightTable,
    confusions: ConfusionTable,
    melodic: SequenceGenerator,
    intervals: IntervalGenerator,
    aggregator: SessionAggregator,
    current: Option<ActiveQuestion>,
    repository: S,
    rng: R,
    clock: C,
}

impl<S: Repository> PracticeEngine<S> {
    /// Start a session with an entropy-seeded RNG and the system clock
    pub fn new(config: Configuration, repository: S) -> Result<Self> {
        Self::start(config, repository, StdRng::from_entropy(), SystemClock)
    }
}

impl<S: Repository, R: RandomSource, C: Clock> PracticeEngine<S, R, C> {
    /// Validate `config`, build the pool and load this exercise's tables
    pub fn start(config: Configuration, repository: S, rng: R, clock: C) -> Result<Self> {
        config.validate()?;

        let pool = config.build_pool();
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }

        let weights = WeightTable::from_entries(
            config.severity_cap,
            repository.load_table(&needs_practice_table(config.exercise)),
        );
        let confusions =
            ConfusionTable::from_entries(repository.load_table(&confusions_table(config.exercise)));

        info!(
            exercise = config.exercise.as_str(),
            pool = pool.len(),
            needs_practice = weights.len(),
            confusions = confusions.len(),
            "session started"
        );

        Ok(Self {
            config,
            pool,
            weights,
            confusions,
            melodic: SequenceGenerator::new(),
            intervals: IntervalGenerator::new(),
            aggregator: SessionAggregator::new(),
            current: None,
            repository,
            rng,
            clock,
        })
    }

    /// Generate the next question, replacing any question in progress
    pub fn next_question(&mut self) -> &Question {
        let active = match self.config.exercise {
            ExerciseKind::Melodic => self.melodic_question(
                self.config.elements_per_question,
                self.config.extra_elements,
            ),
            ExerciseKind::SingleNote => self.melodic_question(1, 0),
            ExerciseKind::IntervalComparison => self.interval_question(),
        };
        debug!(played = ?active.question.played(), "question ready");

        self.aggregator.question_started(self.clock.now());
        &self.current.insert(active).question
    }

    fn melodic_question(&mut self, scored: usize, extra: usize) -> ActiveQuestion {
        let generated = self.melodic.generate(
            &self.pool,
            &self.weights,
            self.config.adjacency,
            scored + extra,
            &mut self.rng,
        );
        let answers = generated.elements[..scored.min(generated.elements.len())].to_vec();
        ActiveQuestion {
            question: Question::new(generated.elements, answers, self.config.answer_period()),
            reasons: generated.reasons,
            interval: None,
        }
    }

    fn interval_question(&mut self) -> ActiveQuestion {
        let sequence = self.intervals.generate(
            &self.config.intervals,
            self.config.elements_per_question,
            &mut self.rng,
        );
        ActiveQuestion {
            question: Question::new(sequence.offsets.clone(), sequence.magnitudes.clone(), None),
            reasons: Vec::new(),
            interval: Some(sequence),
        }
    }

    /// Answer the current position of the question in progress
    pub fn answer(&mut self, chosen: Element) -> Result<AnswerFeedback> {
        let active = self.current.as_mut().ok_or(EngineError::NoActiveQuestion)?;
        let check = active
            .question
            .check(chosen)
            .ok_or(EngineError::NoActiveQuestion)?;
        let question_complete = active.question.is_complete();

        self.aggregator.record_answer(check.correct);
        if check.correct {
            self.weights.record_success(check.key());
        } else {
            self.weights.record_failure(check.key(), check.chosen_key());
            self.confusions.record_confusion(check.expected, check.chosen);
        }
        debug!(
            correct = check.correct,
            key = %check.key(),
            severity = self.weights.severity(check.key()),
            "answer recorded"
        );
        self.persist_tables();

        let counted_seconds = if question_complete {
            self.aggregator.question_completed(self.clock.now())
        } else {
            None
        };

        Ok(AnswerFeedback {
            check,
            question_complete,
            counted_seconds,
        })
    }

    fn persist_tables(&mut self) {
        let exercise = self.config.exercise;

        let name = needs_practice_table(exercise);
        if let Err(e) = self.repository.save_table(&name, &self.weights.entries()) {
            warn!(table = %name, error = %e, "failed to save table");
        }

        let name = confusions_table(exercise);
        if let Err(e) = self.repository.save_table(&name, &self.confusions.entries()) {
            warn!(table = %name, error = %e, "failed to save table");
        }
    }

    /// End the session and append its record to the log.
    ///
    /// Returns `None` when nothing was answered. Counters reset afterwards,
    /// so a second call without new answers records nothing.
    pub fn finish(&mut self) -> Option<SessionRecord> {
        self.current = None;
        let record = self.aggregator.finalize(
            self.config.exercise.as_str(),
            &self.config,
            &self.weights,
            self.clock.wall_time(),
        );
        self.aggregator = SessionAggregator::new();

        let record = record?;
        if let Err(e) = self.repository.append_session(&record) {
            warn!(error = %e, "failed to append session record");
        }
        info!(
            exercise = %record.exercise,
            score = record.score,
            attempts = record.total_attempts,
            "session finished"
        );
        Some(record)
    }

    /// Question in progress, if any
    pub fn question(&self) -> Option<&Question> {
        self.current.as_ref().map(|active| &active.question)
    }

    /// Why each played element of the current melodic question was picked
    pub fn pick_reasons(&self) -> &[PickReason] {
        self.current
            .as_ref()
            .map(|active| active.reasons.as_slice())
            .unwrap_or_default()
    }

    /// Structure of the current interval-comparison question
    pub fn interval_sequence(&self) -> Option<&IntervalSequence> {
        self.current.as_ref().and_then(|active| active.interval.as_ref())
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Elements the user may answer with
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn confusions(&self) -> &ConfusionTable {
        &self.confusions
    }

    pub fn aggregator(&self) -> &SessionAggregator {
        &self.aggregator
    }

    /// Past sessions from the log
    pub fn history(&self) -> Vec<SessionRecord> {
        self.repository.list_sessions()
    }

    pub fn repository(&self) -> &S {
        &self.repository
    }

    pub fn into_repository(self) -> S {
        self.repository
    }
}
