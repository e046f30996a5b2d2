//! Run Configuration

use std::path::PathBuf;

use crate::eval::AnalogyQuery;
use crate::worker::WorkerPoolConfig;

/// Analogies solved when none are given
pub const DEFAULT_ANALOGIES: [(&str, &str, &str); 4] = [
    ("king", "man", "queen"),
    ("in", "out", "up"),
    ("doctor", "hospital", "teacher"),
    ("author", "story", "poet"),
];

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding table (GloVe text format)
    pub embeddings: PathBuf,

    /// Tab-separated similarity corpus
    pub corpus: PathBuf,

    /// Report destination
    pub output: PathBuf,

    /// Analogy queries, solved after the similarity evaluation
    pub analogies: Vec<AnalogyQuery>,

    /// Analogy worker pool settings
    pub workers: WorkerPoolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embeddings: PathBuf::from("glove.6B.300d.txt"),
            corpus: PathBuf::from("wordsim-353.txt"),
            output: PathBuf::from("output.txt"),
            analogies: default_analogies(),
            workers: WorkerPoolConfig::default(),
        }
    }
}

impl Config {
    pub fn with_embeddings(mut self, path: impl Into<PathBuf>) -> Self {
        self.embeddings = path.into();
        self
    }

    pub fn with_corpus(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus = path.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Replace the analogy list; an empty list keeps the defaults
    pub fn with_analogies(mut self, analogies: Vec<AnalogyQuery>) -> Self {
        if !analogies.is_empty() {
            self.analogies = analogies;
        }
        self
    }

    pub fn with_workers(mut self, workers: WorkerPoolConfig) -> Self {
        self.workers = workers;
        self
    }
}

pub fn default_analogies() -> Vec<AnalogyQuery> {
    DEFAULT_ANALOGIES
        .iter()
        .map(|&(a, b, c)| AnalogyQuery::new(a, b, c))
        .collect()
}
