//! Vector Module
//!
//! Embedding storage and similarity scoring.

mod similarity;
mod store;

pub use similarity::{cosine_similarity, dot_product, magnitude, SimilarityScorer, DEFAULT_SCALE};
pub use store::VectorStore;
