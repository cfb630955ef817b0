//! Benchmarks for low-level practice primitives.

mod generator;
mod pool;
mod weights;

pub use generator::bench_generator;
pub use pool::bench_pool;
pub use weights::bench_weights;
