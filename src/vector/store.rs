//! Vector Store
//!
//! Immutable term -> vector table loaded from a whitespace-delimited
//! embedding file (GloVe text format).

use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    /// Terms in insertion order
    terms: Vec<String>,
    /// Term -> row index
    index: HashMap<String, usize>,
    /// Row-major vector data, `terms.len() * dimension` values
    data: Vec<f32>,
    dimension: usize,
}

/// Read-only embedding table
///
/// Cloning is cheap: all clones share the same underlying table, so worker
/// threads can each hold a handle without copying vectors.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    inner: Arc<Inner>,
}

impl VectorStore {
    /// Parse an embedding table from a reader
    ///
    /// Lines starting with `#` and blank lines are skipped. Every other line
    /// is `<term> <v1> ... <vD>` separated by single spaces. The first record
    /// fixes D.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = Builder::default();

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

            let mut fields = line.split(' ');
            // split always yields at least one item
            let term = fields.next().unwrap_or_default();
            let vector = fields
                .map(|field| {
                    field.parse::<f32>().map_err(|e| Error::MalformedRecord {
                        line: line_no,
                        reason: format!("invalid component {:?} for {:?}: {}", field, term, e),
                    })
                })
                .collect::<Result<Vec<f32>>>()?;

            builder.insert(term, vector, line_no)?;
        }

        let store = builder.build();
        info!(
            "Loaded {} vectors of dimension {}",
            store.len(),
            store.dimension()
        );
        Ok(store)
    }

    /// Load an embedding table from a file path
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening embedding file {}", path.display());
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Build a store from in-memory entries
    pub fn from_entries<I, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Vec<f32>)>,
        T: Into<String>,
    {
        let mut builder = Builder::default();
        for (i, (term, vector)) in entries.into_iter().enumerate() {
            let term: String = term.into();
            builder.insert(&term, vector, i + 1)?;
        }
        Ok(builder.build())
    }

    /// Get the vector for a term
    pub fn get(&self, term: &str) -> Result<&[f32]> {
        self.inner
            .index
            .get(term)
            .map(|&row| self.row(row))
            .ok_or_else(|| Error::TermNotFound(term.to_string()))
    }

    /// Check if a term exists
    pub fn contains(&self, term: &str) -> bool {
        self.inner.index.contains_key(term)
    }

    /// Vector dimension (0 for an empty store)
    pub fn dimension(&self) -> usize {
        self.inner.dimension
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.inner.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.terms.is_empty()
    }

    /// Terms in insertion order
    pub fn terms(&self) -> &[String] {
        &self.inner.terms
    }

    /// Iterate (term, vector) in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.inner
            .terms
            .iter()
            .enumerate()
            .map(move |(row, term)| (term.as_str(), self.row(row)))
    }

    fn row(&self, row: usize) -> &[f32] {
        let d = self.inner.dimension;
        &self.inner.data[row * d..(row + 1) * d]
    }
}

#[derive(Default)]
struct Builder {
    inner: Inner,
}

impl Builder {
    fn insert(&mut self, term: &str, vector: Vec<f32>, line: usize) -> Result<()> {
        if vector.is_empty() {
            return Err(Error::MalformedRecord {
                line,
                reason: format!("no vector components for {:?}", term),
            });
        }

        if let Some(bad) = vector.iter().find(|x| !x.is_finite()) {
            return Err(Error::MalformedRecord {
                line,
                reason: format!("non-finite component {} for {:?}", bad, term),
            });
        }

        let inner = &mut self.inner;
        if inner.dimension == 0 {
            inner.dimension = vector.len();
        } else if vector.len() != inner.dimension {
            return Err(Error::MalformedRecord {
                line,
                reason: format!(
                    "expected {} components for {:?}, got {}",
                    inner.dimension,
                    term,
                    vector.len()
                ),
            });
        }

        match inner.index.get(term) {
            // Repeated term: replace the vector, keep the original position
            Some(&row) => {
                let d = inner.dimension;
                inner.data[row * d..(row + 1) * d].copy_from_slice(&vector);
            }
            None => {
                inner.index.insert(term.to_string(), inner.terms.len());
                inner.terms.push(term.to_string());
                inner.data.extend_from_slice(&vector);
            }
        }
        Ok(())
    }

    fn build(self) -> VectorStore {
        VectorStore {
            inner: Arc::new(self.inner),
        }
    }
}
