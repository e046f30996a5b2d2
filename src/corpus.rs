//! Similarity Corpus
//!
//! Reader for tab-separated human-annotated word pairs
//! (`tag \t word1 \t word2 \t score`, WordSim-353 layout).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// One row of the similarity corpus
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityPair {
    pub tag: String,
    pub word_a: String,
    pub word_b: String,
    pub human_score: f64,
    /// Score text as it appeared in the corpus, echoed back in reports
    pub raw_score: Option<String>,
}

impl SimilarityPair {
    pub fn new(
        tag: impl Into<String>,
        word_a: impl Into<String>,
        word_b: impl Into<String>,
        human_score: f64,
    ) -> Self {
        Self {
            tag: tag.into(),
            word_a: word_a.into(),
            word_b: word_b.into(),
            human_score,
            raw_score: None,
        }
    }

    pub fn with_raw_score(mut self, raw: impl Into<String>) -> Self {
        self.raw_score = Some(raw.into());
        self
    }
}

/// Parse corpus rows from a reader, skipping `#` comments and blank lines
pub fn read_pairs<R: BufRead>(reader: R) -> Result<Vec<SimilarityPair>> {
    let mut pairs = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.starts_with('#') {
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [tag, word_a, word_b, score] = fields[..] else {
            return Err(Error::MalformedRecord {
                line: line_no,
                reason: format!("expected 4 tab-separated fields, got {}", fields.len()),
            });
        };
        let human_score = score.trim().parse::<f64>().map_err(|e| Error::MalformedRecord {
            line: line_no,
            reason: format!("invalid human score {:?}: {}", score, e),
        })?;

        pairs.push(SimilarityPair::new(tag, word_a, word_b, human_score).with_raw_score(score));
    }

    debug!("Read {} similarity pairs", pairs.len());
    Ok(pairs)
}

/// Parse corpus rows from a file path
pub fn read_pairs_file<P: AsRef<Path>>(path: P) -> Result<Vec<SimilarityPair>> {
    let file = File::open(path)?;
    read_pairs(BufReader::new(file))
}
