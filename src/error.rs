//! Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Term not found: {0}")]
    TermNotFound(String),
    #[error("Degenerate vector: zero magnitude")]
    DegenerateVector,
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Insufficient data: {scored} scored pairs, need at least 2")]
    InsufficientData { scored: usize },
    #[error("Correlation undefined: constant score series")]
    UndefinedCorrelation,
    #[error("Invalid analogy query: {0}")]
    InvalidQuery(String),
    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, Error>;
