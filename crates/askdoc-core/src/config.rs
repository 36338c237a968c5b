use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub chunking: ChunkingConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct GeminiConfig {
    /// API key; usually supplied via `GEMINI_API_KEY` rather than the file.
    pub api_key: Option<String>,
    pub model: String,
    pub embed_model: String,
}

#[derive(Debug, Deserialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Deserialize)]
pub struct IndexConfig {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("GEMINI_API_KEY") {
            self.gemini.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("GEMINI_MODEL") {
            self.gemini.model = v;
        }
        if let Ok(v) = std::env::var("GEMINI_EMBED_MODEL") {
            self.gemini.embed_model = v;
        }
        if let Ok(v) = std::env::var("CHUNK_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.chunking.chunk_size = size;
        }
        if let Ok(v) = std::env::var("CHUNK_OVERLAP")
            && let Ok(overlap) = v.parse::<usize>()
        {
            self.chunking.chunk_overlap = overlap;
        }
        if let Ok(v) = std::env::var("VECTOR_STORE_PATH") {
            self.index.path = v;
        }
        if let Ok(v) = std::env::var("TOP_K")
            && let Ok(k) = v.parse::<usize>()
        {
            self.retrieval.top_k = k;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            self.log_level = v;
        }
    }

    fn default() -> Self {
        Self {
            gemini: GeminiConfig {
                api_key: None,
                model: "gemini-2.5-flash".into(),
                embed_model: "text-embedding-004".into(),
            },
            chunking: ChunkingConfig {
                chunk_size: 1000,
                chunk_overlap: 200,
            },
            index: IndexConfig {
                path: "data/processed/faiss_index".into(),
            },
            retrieval: RetrievalConfig { top_k: 3 },
            log_level: "INFO".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    const ENV_KEYS: &[&str] = &[
        "GEMINI_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_EMBED_MODEL",
        "CHUNK_SIZE",
        "CHUNK_OVERLAP",
        "VECTOR_STORE_PATH",
        "TOP_K",
        "LOG_LEVEL",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn defaults_when_file_missing() {
        clear_env();
        let config = Config::load(Path::new("/nonexistent/askdoc.toml")).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.embed_model, "text-embedding-004");
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.index.path, "data/processed/faiss_index");
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.log_level, "INFO");
    }

    #[test]
    #[serial]
    fn parse_valid_toml() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("askdoc.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"
log_level = "debug"

[gemini]
model = "gemini-2.0-pro"
embed_model = "text-embedding-005"

[chunking]
chunk_size = 500
chunk_overlap = 50

[index]
path = "/tmp/idx"

[retrieval]
top_k = 5
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.0-pro");
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.chunk_overlap, 50);
        assert_eq!(config.index.path, "/tmp/idx");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn env_overrides() {
        clear_env();
        let mut config = Config::default();
        assert_eq!(config.retrieval.top_k, 3);

        unsafe {
            std::env::set_var("TOP_K", "7");
            std::env::set_var("GEMINI_API_KEY", "sk-test");
            std::env::set_var("CHUNK_SIZE", "256");
        }
        config.apply_env_overrides();
        clear_env();

        assert_eq!(config.retrieval.top_k, 7);
        assert_eq!(config.gemini.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.chunking.chunk_size, 256);
    }

    #[test]
    #[serial]
    fn invalid_numeric_env_ignored() {
        clear_env();
        let mut config = Config::default();

        unsafe { std::env::set_var("TOP_K", "not-a-number") };
        config.apply_env_overrides();
        clear_env();

        assert_eq!(config.retrieval.top_k, 3);
    }
}
