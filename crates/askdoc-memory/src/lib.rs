//! Document ingestion, chunking, persisted vector index, retrieval, and
//! answer composition.

pub mod answer;
pub mod document;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod retriever;

pub use answer::{AnswerComposer, compose_prompt};
pub use error::{IndexError, PipelineError};
pub use index::{ScoredChunk, VectorIndex};
pub use pipeline::{IngestReport, IngestionPipeline};
pub use retriever::Retriever;
