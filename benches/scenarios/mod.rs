//! Benchmarks for whole practice sessions.

mod session;

pub use session::bench_session;
