pub mod config; // Exercise configuration and query-form exchange
pub mod engine; // Session owner: questions, answers, persistence
pub mod error;
pub mod generator; // Melodic and interval-comparison sequences
pub mod pool;
pub mod random;
pub mod session; // Counters, timing, session records
pub mod store;
pub mod tracking; // Needs-practice weights and confusion pairs

pub use config::{Configuration, DirectionPolicy, ExerciseKind, IntervalSettings};
pub use engine::{AnswerFeedback, PracticeEngine};
pub use error::{ConfigError, EngineError, StoreError};
pub use pool::{Element, ElementRange, Pool};
pub use random::{RandomSource, ScriptedRandom};
pub use session::{Clock, ManualClock, SessionRecord, SystemClock};
pub use store::{DirectoryStore, KeyValueRepository, MemoryStore, Repository};
