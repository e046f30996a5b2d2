//! Word Similarity Evaluation
//!
//! Scores human-annotated word pairs with the embedding scorer and
//! correlates machine scores against human judgments.

use tracing::{debug, info, warn};

use crate::corpus::SimilarityPair;
use crate::error::{Error, Result};
use crate::vector::{SimilarityScorer, VectorStore};

/// A corpus pair with its machine score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub pair: SimilarityPair,
    pub machine_score: f32,
}

/// Scored pairs in input order plus the pairs that could not be scored
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub scored: Vec<ScoredPair>,
    /// Out-of-vocabulary terms
    pub skipped: Vec<String>,
    /// Pairs with a zero-magnitude vector, excluded from the correlation
    pub degenerate: Vec<SimilarityPair>,
}

impl Evaluation {
    /// Pearson correlation of human vs machine scores, rounded to 4 decimals
    pub fn correlation(&self) -> Result<f64> {
        if self.scored.len() < 2 {
            return Err(Error::InsufficientData {
                scored: self.scored.len(),
            });
        }
        let human: Vec<f64> = self.scored.iter().map(|s| s.pair.human_score).collect();
        let machine: Vec<f64> = self
            .scored
            .iter()
            .map(|s| f64::from(s.machine_score))
            .collect();
        pearson(&human, &machine).map(round4)
    }
}

/// Evaluates similarity pairs against a vector store
#[derive(Debug, Clone)]
pub struct SimilarityEvaluator {
    store: VectorStore,
    scorer: SimilarityScorer,
}

impl SimilarityEvaluator {
    pub fn new(store: VectorStore) -> Self {
        Self {
            store,
            scorer: SimilarityScorer::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Score every pair whose words are both in the store
    ///
    /// Missing words are recorded in `skipped` and pairs with a zero vector
    /// in `degenerate`; neither kind is scored.
    pub fn score_pairs(&self, pairs: &[SimilarityPair]) -> Result<Evaluation> {
        let mut eval = Evaluation::default();

        for pair in pairs {
            let mut missing = false;
            for word in [&pair.word_a, &pair.word_b] {
                if !self.store.contains(word) {
                    eval.skipped.push(word.clone());
                    missing = true;
                }
            }
            if missing {
                debug!("Skipping pair {} / {}: not in vocabulary", pair.word_a, pair.word_b);
                continue;
            }

            let u = self.store.get(&pair.word_a)?;
            let v = self.store.get(&pair.word_b)?;
            let machine_score = match self.scorer.score(u, v) {
                Ok(score) => score,
                Err(Error::DegenerateVector) => {
                    warn!("Pair {} / {} has a zero vector", pair.word_a, pair.word_b);
                    eval.degenerate.push(pair.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            eval.scored.push(ScoredPair {
                pair: pair.clone(),
                machine_score,
            });
        }

        info!(
            "Scored {} of {} pairs ({} terms not found, {} degenerate)",
            eval.scored.len(),
            pairs.len(),
            eval.skipped.len(),
            eval.degenerate.len()
        );
        Ok(eval)
    }

    /// Score pairs and compute the correlation in one step
    ///
    /// Fails without partial output when the correlation is undefined; use
    /// [`score_pairs`](Self::score_pairs) and [`Evaluation::correlation`] to
    /// keep the scored rows and skipped terms in that case.
    pub fn evaluate(&self, pairs: &[SimilarityPair]) -> Result<(Evaluation, f64)> {
        let eval = self.score_pairs(pairs)?;
        let correlation = eval.correlation()?;
        Ok((eval, correlation))
    }
}

/// Pearson correlation coefficient of two equal-length series
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(Error::DimensionMismatch {
            expected: xs.len(),
            actual: ys.len(),
        });
    }
    let n = xs.len();
    if n < 2 {
        return Err(Error::InsufficientData { scored: n });
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(Error::UndefinedCorrelation);
    }
    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Round to 4 decimal digits
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> VectorStore {
        VectorStore::from_entries(vec![
            ("cat", vec![1.0, 0.9, 0.0]),
            ("dog", vec![0.9, 1.0, 0.1]),
            ("car", vec![0.0, 0.2, 1.0]),
            ("zero", vec![0.0, 0.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_pearson_perfect() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        // r = 0.8 for this textbook series
        let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0]).unwrap();
        assert!((r - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_series() {
        assert!(matches!(
            pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]),
            Err(Error::UndefinedCorrelation)
        ));
    }

    #[test]
    fn test_pearson_length_mismatch() {
        assert!(matches!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(-0.98766), -0.9877);
    }

    #[test]
    fn test_two_pair_evaluation() {
        let evaluator = SimilarityEvaluator::new(test_store());
        let pairs = vec![
            SimilarityPair::new("A", "cat", "dog", 7.5),
            SimilarityPair::new("B", "cat", "car", 3.0),
        ];

        let (eval, correlation) = evaluator.evaluate(&pairs).unwrap();

        assert_eq!(eval.scored.len(), 2);
        assert!(eval.skipped.is_empty());
        assert_eq!(eval.scored[0].pair.word_b, "dog");
        assert!(eval.scored[0].machine_score > eval.scored[1].machine_score);
        // Two points are always perfectly correlated
        assert_eq!(correlation, 1.0);
    }

    #[test]
    fn test_empty_pairs() {
        let evaluator = SimilarityEvaluator::new(test_store());
        let eval = evaluator.score_pairs(&[]).unwrap();

        assert!(eval.skipped.is_empty());
        assert!(matches!(
            eval.correlation(),
            Err(Error::InsufficientData { scored: 0 })
        ));
        assert!(matches!(
            evaluator.evaluate(&[]),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_out_of_vocabulary_pairs_skipped() {
        let evaluator = SimilarityEvaluator::new(test_store());
        let pairs = vec![
            SimilarityPair::new("A", "cat", "dog", 7.5),
            SimilarityPair::new("B", "tiger", "jaguar", 8.0),
            SimilarityPair::new("C", "cat", "lion", 6.0),
            SimilarityPair::new("D", "dog", "car", 2.0),
        ];

        let eval = evaluator.score_pairs(&pairs).unwrap();

        assert_eq!(eval.skipped, vec!["tiger", "jaguar", "lion"]);
        let tags: Vec<&str> = eval.scored.iter().map(|s| s.pair.tag.as_str()).collect();
        assert_eq!(tags, vec!["A", "D"]);
    }

    #[test]
    fn test_single_scored_pair() {
        let evaluator = SimilarityEvaluator::new(test_store());
        let pairs = vec![
            SimilarityPair::new("A", "cat", "dog", 7.5),
            SimilarityPair::new("B", "cat", "lion", 6.0),
        ];

        let eval = evaluator.score_pairs(&pairs).unwrap();

        assert_eq!(eval.scored.len(), 1);
        assert_eq!(eval.skipped, vec!["lion"]);
        assert!(matches!(
            eval.correlation(),
            Err(Error::InsufficientData { scored: 1 })
        ));
        assert!(matches!(
            evaluator.evaluate(&pairs),
            Err(Error::InsufficientData { scored: 1 })
        ));
    }

    #[test]
    fn test_degenerate_pair_recorded_and_excluded() {
        let evaluator = SimilarityEvaluator::new(test_store());
        let pairs = vec![
            SimilarityPair::new("A", "cat", "dog", 7.5),
            SimilarityPair::new("B", "x", "y", 4.0),
            SimilarityPair::new("C", "cat", "zero", 5.0),
            SimilarityPair::new("D", "cat", "car", 3.0),
            SimilarityPair::new("E", "dog", "car", 2.0),
        ];

        let eval = evaluator.score_pairs(&pairs).unwrap();

        let tags: Vec<&str> = eval.scored.iter().map(|s| s.pair.tag.as_str()).collect();
        assert_eq!(tags, vec!["A", "D", "E"]);
        assert_eq!(eval.skipped, vec!["x", "y"]);
        assert_eq!(eval.degenerate.len(), 1);
        assert_eq!(eval.degenerate[0].tag, "C");
        assert!(eval.correlation().is_ok());
    }
}
