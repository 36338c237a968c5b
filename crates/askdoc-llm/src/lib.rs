//! Remote embedding and text-generation boundary.

pub mod error;
pub mod gemini;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod provider;

pub use error::{EmbeddingError, GenerationError};
pub use gemini::GeminiClient;
pub use provider::{Embedder, TextGenerator};
