use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub content_type: String,
    pub extra: HashMap<String, String>,
}

/// One logical unit of a source file: a PDF page, a CSV row, or a whole
/// text file. Immutable once produced by a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// A bounded slice of a [`Document`], the unit of embedding and retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub metadata: DocumentMetadata,
    /// Position of this chunk within its source document.
    pub chunk_index: usize,
    /// Character offset of the chunk start within the source document.
    pub offset: usize,
}
