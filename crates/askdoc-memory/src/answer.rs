use std::sync::Arc;

use askdoc_llm::{GenerationError, TextGenerator};

use crate::document::Chunk;

/// Build the generation prompt: fixed instruction, retrieved chunk contents
/// in order separated by blank lines, then the question.
#[must_use]
pub fn compose_prompt(question: &str, chunks: &[Chunk]) -> String {
    let context = chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Use the following context to answer the question.\n\n\
         Context:\n{context}\n\n\
         Question: {question}\nAnswer:"
    )
}

/// Single-shot question answering over retrieved chunks. No conversation
/// state is kept between calls.
pub struct AnswerComposer {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for AnswerComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerComposer").finish_non_exhaustive()
    }
}

impl AnswerComposer {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Compose the prompt and return the generation API's text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the remote call fails; there is no
    /// retry.
    pub async fn answer(&self, question: &str, chunks: &[Chunk]) -> Result<String, GenerationError> {
        let prompt = compose_prompt(question, chunks);
        tracing::debug!(prompt_len = prompt.len(), chunks = chunks.len(), "generating answer");
        self.generator.generate(&prompt).await
    }
}
