//! WORDSIM - Word Embedding Evaluation
//!
//! Loads a static word-embedding table and evaluates it two ways:
//! correlation of cosine similarity with human similarity judgments, and
//! vector-offset analogies solved by exhaustive nearest-neighbour search.

pub mod config;
pub mod corpus;
pub mod error;
pub mod eval;
pub mod metrics;
pub mod report;
pub mod vector;
pub mod worker;

pub use config::Config;
pub use corpus::SimilarityPair;
pub use error::{Error, Result};
pub use eval::{
    AnalogyQuery, AnalogyResult, AnalogySolver, Evaluation, ScoredPair, SimilarityEvaluator,
};
pub use metrics::Metrics;
pub use vector::{SimilarityScorer, VectorStore};
pub use worker::{WorkerPool, WorkerPoolConfig};
