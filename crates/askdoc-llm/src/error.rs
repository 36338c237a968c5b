#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("embedding API request failed (status {status})")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unrecognized embedding response shape: {raw}")]
    UnrecognizedShape { raw: serde_json::Value },

    #[error("embedding count mismatch: sent {sent} texts, received {received} vectors")]
    CountMismatch { sent: usize, received: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("generation API request failed (status {status})")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("empty response from generation API")]
    EmptyResponse,
}
