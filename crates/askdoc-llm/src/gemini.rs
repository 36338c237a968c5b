//! Gemini REST client for batched embeddings and single-shot generation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, GenerationError};
use crate::provider::{Embedder, TextGenerator};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    embedding_model: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: String, model: String, embedding_model: String) -> Self {
        Self {
            client: crate::http::default_client(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model,
            embedding_model,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, mut base_url: String) -> Self {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Embed a batch of texts in one remote call.
    ///
    /// Returns one vector per input text, in input order. No caching and no
    /// retry: identical texts are re-embedded on every call, and failures
    /// surface immediately.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] on network/auth failure, on a response
    /// whose shape is not recognized (carrying the raw payload), or when the
    /// vector count does not match the input count.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let model_path = format!("models/{}", self.embedding_model);
        let body = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedRequest {
                    model: &model_path,
                    content: Content::from_text(text),
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:batchEmbedContents",
                self.base_url, self.embedding_model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.map_err(EmbeddingError::Http)?;

        if !status.is_success() {
            tracing::error!("Gemini embedding API error {status}: {text}");
            return Err(EmbeddingError::Api { status, body: text });
        }

        let raw: serde_json::Value = serde_json::from_str(&text)?;
        let vectors = parse_embeddings(raw)?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                sent: texts.len(),
                received: vectors.len(),
            });
        }

        Ok(vectors)
    }

    /// Send one prompt to the generation model and return its text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on network/auth failure, a non-success
    /// status, or a response with no candidate text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![Content::from_text(prompt)],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.map_err(GenerationError::Http)?;

        if !status.is_success() {
            tracing::error!("Gemini generation API error {status}: {text}");
            return Err(GenerationError::Api { status, body: text });
        }

        let resp: GenerateResponse = serde_json::from_str(&text)?;

        let answer = resp
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|s| !s.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(answer)
    }
}

impl Embedder for GeminiClient {
    fn embed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> std::pin::Pin<
        Box<dyn Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send + 'a>,
    > {
        Box::pin(Self::embed(self, texts))
    }
}

impl TextGenerator for GeminiClient {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> std::pin::Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(Self::generate(self, prompt))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedRequest<'a>>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn from_text(text: &'a str) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

/// The envelope shapes the embedding API has been observed to return.
///
/// The API surface exposes vectors under `embeddings` (batch endpoint,
/// each item keyed `values` or `embedding`), `data` (OpenAI-compatible
/// surface), or a bare `embedding` list-of-lists (legacy single-content
/// endpoint).
#[derive(Deserialize)]
#[serde(untagged)]
enum EmbeddingEnvelope {
    Batch { embeddings: Vec<EmbeddingItem> },
    Data { data: Vec<EmbeddingItem> },
    Flat { embedding: Vec<Vec<f32>> },
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(alias = "embedding")]
    values: Vec<f32>,
}

/// Normalize a raw embedding response into ordered vectors.
///
/// # Errors
///
/// Returns [`EmbeddingError::UnrecognizedShape`] carrying the raw payload
/// when none of the known envelopes match.
fn parse_embeddings(raw: serde_json::Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    match serde_json::from_value::<EmbeddingEnvelope>(raw.clone()) {
        Ok(EmbeddingEnvelope::Batch { embeddings }) => {
            Ok(embeddings.into_iter().map(|e| e.values).collect())
        }
        Ok(EmbeddingEnvelope::Data { data }) => Ok(data.into_iter().map(|e| e.values).collect()),
        Ok(EmbeddingEnvelope::Flat { embedding }) => Ok(embedding),
        Err(_) => Err(EmbeddingError::UnrecognizedShape { raw }),
    }
}
