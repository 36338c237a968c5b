use std::path::PathBuf;
use std::sync::Arc;

use askdoc_llm::Embedder;

use crate::error::IndexError;
use crate::index::{ScoredChunk, VectorIndex};

/// Loads the persisted index and answers top-k similarity queries.
///
/// Holds the embedding client explicitly: the question is embedded here
/// and only the resulting vector reaches the index.
pub struct Retriever {
    index_dir: PathBuf,
    embedder: Arc<dyn Embedder>,
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("index_dir", &self.index_dir)
            .finish_non_exhaustive()
    }
}

impl Retriever {
    #[must_use]
    pub fn new(index_dir: impl Into<PathBuf>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            index_dir: index_dir.into(),
            embedder,
        }
    }

    /// Top-k most relevant chunks for `question`, best-first.
    ///
    /// The index is reloaded from disk on every call, so each question sees
    /// the most recently persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotFound`] when nothing has been ingested yet,
    /// or an error if query embedding or the search fails.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        let index = VectorIndex::restore(&self.index_dir)?;

        let texts = [question.to_owned()];
        let mut vectors = self.embedder.embed(&texts).await?;
        let query = vectors.pop().ok_or(IndexError::Embedding(
            askdoc_llm::EmbeddingError::CountMismatch {
                sent: 1,
                received: 0,
            },
        ))?;

        let hits = index.search(&query, k)?;
        tracing::debug!(
            question_len = question.len(),
            k,
            hits = hits.len(),
            "retrieved chunks"
        );
        Ok(hits)
    }
}
