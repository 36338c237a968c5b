//! Test-only deterministic embedder and generator.

use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::error::{EmbeddingError, GenerationError};
use crate::provider::{Embedder, TextGenerator};

/// Deterministic embedder: the vector for a text depends only on its bytes,
/// so identical texts always map to identical vectors.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    pub dimension: usize,
    pub fail: bool,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self {
            dimension: 8,
            fail: false,
        }
    }
}

impl MockEmbedder {
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimension] += f32::from(byte) / 255.0;
        }
        vector
    }
}

impl Embedder for MockEmbedder {
    fn embed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send + 'a>> {
        Box::pin(async move {
            if self.fail {
                return Err(EmbeddingError::UnrecognizedShape {
                    raw: serde_json::json!({"mock": "embedding failure"}),
                });
            }
            Ok(texts.iter().map(|t| self.embed_one(t)).collect())
        })
    }
}

/// Canned generator that records the prompts it was called with.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    pub response: String,
    pub fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            response: "mock answer".into(),
            fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockGenerator {
    #[must_use]
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Prompts received so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl TextGenerator for MockGenerator {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(async move {
            if self.fail {
                return Err(GenerationError::EmptyResponse);
            }
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_owned());
            }
            Ok(self.response.clone())
        })
    }
}
