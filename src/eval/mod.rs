//! Evaluation Module
//!
//! Word similarity correlation and vector analogies.

mod analogy;
mod similarity;

pub use analogy::{AnalogyQuery, AnalogyResult, AnalogySolver};
pub use similarity::{pearson, round4, Evaluation, ScoredPair, SimilarityEvaluator};
