use std::path::PathBuf;

use askdoc_llm::EmbeddingError;

use crate::document::DocumentError;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("no index found at {path}; ingest a document first")]
    NotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("vector dimension mismatch: index holds {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Sum of the failures one ingest action can surface.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] DocumentError),

    #[error(transparent)]
    Index(#[from] IndexError),
}
