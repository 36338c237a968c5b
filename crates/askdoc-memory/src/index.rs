//! Persisted cosine-similarity index over embedded chunks.
//!
//! The index is pure data (vectors and chunks); query embedding always
//! happens outside, through whatever [`Embedder`] the caller currently
//! holds, so a restored index picks up the live embedding configuration.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use askdoc_llm::Embedder;
use serde::{Deserialize, Serialize};

use crate::document::Chunk;
use crate::error::IndexError;

const INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    vector: Vec<f32>,
    chunk: Chunk,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

/// A search hit: the stored chunk plus its cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub score: f32,
    pub chunk: Chunk,
}

impl VectorIndex {
    /// Embed all chunk contents in one batched call and build the index.
    ///
    /// All-or-nothing: if embedding fails nothing is indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding fails or the returned vectors do not
    /// share one dimension.
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self, IndexError> {
        if chunks.is_empty() {
            return Ok(Self::default());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed(&texts).await?;

        let dimension = vectors.first().map_or(0, Vec::len);
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }

        tracing::debug!(chunks = chunks.len(), dimension, "built vector index");

        Ok(Self {
            entries: vectors
                .into_iter()
                .zip(chunks)
                .map(|(vector, chunk)| IndexEntry { vector, chunk })
                .collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimension of the stored vectors, `None` when empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|e| e.vector.len())
    }

    /// Serialize to `dir/index.json`, creating the directory if absent and
    /// overwriting any previous index.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn persist(&self, dir: &Path) -> Result<(), IndexError> {
        std::fs::create_dir_all(dir)?;
        let file = std::fs::File::create(dir.join(INDEX_FILE))?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        tracing::info!(path = %dir.display(), entries = self.len(), "persisted index");
        Ok(())
    }

    /// Deserialize a previously persisted index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotFound`] when the directory or index file
    /// does not exist — the expected state before first ingestion.
    pub fn restore(dir: &Path) -> Result<Self, IndexError> {
        let file_path = dir.join(INDEX_FILE);
        if !file_path.is_file() {
            return Err(IndexError::NotFound {
                path: dir.to_path_buf(),
            });
        }
        let file = std::fs::File::open(&file_path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Top-k chunks by cosine similarity, best-first.
    ///
    /// Equal scores keep insertion order (stable sort). Returns all entries
    /// when `k` exceeds the index size.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] when the query dimension
    /// differs from the stored vectors'.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        if let Some(dimension) = self.dimension()
            && dimension != query.len()
        {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                score: cosine_similarity(&entry.vector, query),
                chunk: entry.chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
