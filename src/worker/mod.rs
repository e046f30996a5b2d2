//! Worker Module
//!
//! Thread pool for concurrent analogy queries.

mod pool;

pub use pool::{WorkerPool, WorkerPoolConfig};
