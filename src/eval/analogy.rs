//! Word Analogies
//!
//! Solves "a is to b as c is to ?" by exhaustive nearest-neighbour search
//! around the offset vector `b - a + c`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::vector::{magnitude, SimilarityScorer, VectorStore};
use crate::worker::{WorkerPool, WorkerPoolConfig};

/// "a relates to b as c relates to ?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalogyQuery {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl AnalogyQuery {
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    /// Whether `term` is one of the query terms
    pub fn mentions(&self, term: &str) -> bool {
        term == self.a || term == self.b || term == self.c
    }
}

impl fmt::Display for AnalogyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}::{}", self.a, self.b, self.c)
    }
}

/// Parses `a:b:c` (or `a:b::c`)
impl FromStr for AnalogyQuery {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts[..] {
            [a, b, c] | [a, b, "", c] if !(a.is_empty() || b.is_empty() || c.is_empty()) => {
                Ok(Self::new(a, b, c))
            }
            _ => Err(Error::InvalidQuery(format!("expected a:b:c, got {:?}", s))),
        }
    }
}

/// Best candidate for an analogy; `best_term` is `None` when nothing was eligible
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalogyResult {
    pub best_term: Option<String>,
    pub best_score: f32,
}

/// Answers analogy queries against a vector store
#[derive(Debug, Clone)]
pub struct AnalogySolver {
    store: VectorStore,
    scorer: SimilarityScorer,
    pool: WorkerPoolConfig,
    metrics: Arc<Metrics>,
}

impl AnalogySolver {
    pub fn new(store: VectorStore) -> Self {
        Self {
            store,
            scorer: SimilarityScorer::default(),
            pool: WorkerPoolConfig::default(),
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn with_scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_pool(mut self, pool: WorkerPoolConfig) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Solve a single query
    ///
    /// Every store term except a, b and c is scored against `b - a + c`;
    /// the highest score wins, the earliest term on ties.
    pub fn solve(&self, query: &AnalogyQuery) -> Result<AnalogyResult> {
        let a = self.store.get(&query.a)?;
        let b = self.store.get(&query.b)?;
        let c = self.store.get(&query.c)?;

        let target: Vec<f32> = a
            .iter()
            .zip(b)
            .zip(c)
            .map(|((a, b), c)| b - a + c)
            .collect();
        if magnitude(&target) == 0.0 {
            return Err(Error::DegenerateVector);
        }

        let mut best: Option<(&str, f32)> = None;
        for (term, vector) in self.store.iter() {
            if query.mentions(term) {
                continue;
            }
            let score = match self.scorer.score(&target, vector) {
                Ok(score) => score,
                // Zero vectors have no direction to compare against
                Err(Error::DegenerateVector) => continue,
                Err(e) => return Err(e),
            };
            // Overflowing components score NaN, which never compares greater
            if score.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((term, score));
            }
        }

        Ok(match best {
            Some((term, score)) => AnalogyResult {
                best_term: Some(term.to_string()),
                best_score: score,
            },
            None => AnalogyResult::default(),
        })
    }

    /// Solve queries concurrently; results are index-aligned with `queries`
    ///
    /// A failing query yields an `Err` in its own slot only. The outer error
    /// is reserved for worker pool failures.
    pub fn solve_batch(&self, queries: &[AnalogyQuery]) -> Result<Vec<Result<AnalogyResult>>> {
        WorkerPool::new(self.pool.clone(), self.metrics.clone()).run(self, queries)
    }
}
