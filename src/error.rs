//! Error types for the practice engine.
//!
//! Almost everything inside the engine recovers locally (an exhausted
//! adjacency filter widens back to the pool, a corrupt stored table loads
//! empty). What remains here is what a caller can actually act on.

use thiserror::Error;

/// A configuration that cannot drive a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No scored positions per question
    #[error("elements per question must be at least 1")]
    ZeroLength,

    /// Adjacency bounds with min above max
    #[error("adjacency bounds are inverted: min {min} > max {max}")]
    InvertedAdjacency { min: i32, max: i32 },

    /// Severity cap of zero would make every failure a no-op
    #[error("severity cap must be at least 1")]
    ZeroCap,

    /// Interval comparison needs at least one target interval
    #[error("interval comparison needs at least one target interval")]
    NoTargets,

    /// Interval comparison needs two or more elements to hold a step
    #[error("interval comparison needs at least 2 elements per question, got {0}")]
    TooShortForIntervals(usize),

    /// A range wider than any drill can use
    #[error("{field} range {min},{max} is wider than {limit}")]
    RangeTooWide {
        field: &'static str,
        min: i32,
        max: i32,
        limit: u64,
    },

    /// Target interval larger than any range a drill can use
    #[error("target interval {0} is larger than {1}")]
    TargetTooLarge(i32, u64),

    /// Non-target steps have nothing to draw from
    #[error("comparison range {min},{max} leaves no non-target intervals")]
    EmptyComparison { min: i32, max: i32 },
}

/// A failed read or write against the backing key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failure (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded (wraps serde_json::Error)
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A stored value exists but does not parse, so it must not be replaced
    #[error("stored value under '{key}' is unreadable: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by [`crate::engine::PracticeEngine`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Base elements and range produce no candidates at all
    #[error("element pool is empty; no sequence can be generated")]
    EmptyPool,

    /// An answer arrived while no question was being asked
    #[error("no active question")]
    NoActiveQuestion,
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
