use std::future::Future;
use std::pin::Pin;

use crate::error::{EmbeddingError, GenerationError};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Converts text into fixed-dimension vectors, one per input, same order.
pub trait Embedder: Send + Sync {
    fn embed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<Vec<f32>>, EmbeddingError>>;
}

/// Single-shot prompt-to-text generation. No conversation state.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>>;
}
