//! Vector Similarity Functions
//!
//! Cosine similarity and the rescaled scorer used by the evaluators.

use crate::error::{Error, Result};

/// Scale applied to cosine similarity, matching the 10-point human rating scale
pub const DEFAULT_SCALE: f32 = 10.0;

/// Compute dot product of two vectors
///
/// Uses unrolled loop for better CPU performance.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len().min(b.len());
    let mut sum = 0.0f32;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    let remainder = len % 4;

    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] * b[idx];
        sum += a[idx + 1] * b[idx + 1];
        sum += a[idx + 2] * b[idx + 2];
        sum += a[idx + 3] * b[idx + 3];
    }

    for i in (len - remainder)..len {
        sum += a[i] * b[i];
    }

    sum
}

/// Euclidean norm of a vector
#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute cosine similarity between two vectors
///
/// Returns a value in [-1, 1], or `None` when either vector has zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    let denom = magnitude(a) * magnitude(b);
    if denom > 0.0 {
        // Rounding can push |cos| a hair above 1
        Some((dot_product(a, b) / denom).clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Cosine similarity rescaled onto a human-rating-like range
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    scale: f32,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Score two vectors: `cos(u, v) * scale`
    pub fn score(&self, u: &[f32], v: &[f32]) -> Result<f32> {
        if u.len() != v.len() {
            return Err(Error::DimensionMismatch {
                expected: u.len(),
                actual: v.len(),
            });
        }
        cosine_similarity(u, v)
            .map(|cos| cos * self.scale)
            .ok_or(Error::DegenerateVector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.3, -2.0, 5.5],
            vec![-1.0, -1.0, 1.0],
            vec![0.001, 0.002, -0.004],
            vec![7.0, 7.0, 7.0],
        ]
    }

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_unrolled_remainder() {
        let a = vec![1.0; 7];
        let b = vec![2.0; 7];
        assert!((dot_product(&a, &b) - 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_score_is_ten() {
        let scorer = SimilarityScorer::new();
        for u in samples() {
            let s = scorer.score(&u, &u).unwrap();
            assert!((s - 10.0).abs() < 1e-4, "score(u, u) = {}", s);
        }
    }

    #[test]
    fn test_score_symmetric() {
        let scorer = SimilarityScorer::new();
        let vs = samples();
        for u in &vs {
            for v in &vs {
                let uv = scorer.score(u, v).unwrap();
                let vu = scorer.score(v, u).unwrap();
                assert!((uv - vu).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_score_positive_scaling_invariant() {
        let scorer = SimilarityScorer::new();
        let vs = samples();
        for k in [0.5f32, 2.0, 1000.0] {
            for u in &vs {
                let ku: Vec<f32> = u.iter().map(|x| x * k).collect();
                for v in &vs {
                    let a = scorer.score(u, v).unwrap();
                    let b = scorer.score(&ku, v).unwrap();
                    assert!((a - b).abs() < 1e-4, "k={} a={} b={}", k, a, b);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_vector() {
        let scorer = SimilarityScorer::new();
        let zero = vec![0.0, 0.0, 0.0];
        let u = vec![1.0, 2.0, 3.0];
        assert!(matches!(scorer.score(&zero, &u), Err(Error::DegenerateVector)));
        assert!(matches!(scorer.score(&u, &zero), Err(Error::DegenerateVector)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let scorer = SimilarityScorer::new();
        let result = scorer.score(&[1.0, 0.0], &[1.0, 0.0, 0.0]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_custom_scale() {
        let scorer = SimilarityScorer::new().with_scale(1.0);
        let s = scorer.score(&[1.0, 1.0], &[2.0, 2.0]).unwrap();
        assert!((s - 1.0).abs() < 1e-6);
    }
}
