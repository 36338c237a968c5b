//! Component wiring for the CLI commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dialoguer::Input;

use askdoc_core::Config;
use askdoc_llm::GeminiClient;
use askdoc_memory::document::{SplitterConfig, TextSplitter};
use askdoc_memory::{AnswerComposer, IngestionPipeline, Retriever};

pub fn init_subscriber(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level.to_ascii_lowercase()))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn gemini_client(config: &Config) -> anyhow::Result<Arc<GeminiClient>> {
    let api_key = config
        .gemini
        .api_key
        .clone()
        .context("GEMINI_API_KEY is not set")?;
    Ok(Arc::new(GeminiClient::new(
        api_key,
        config.gemini.model.clone(),
        config.gemini.embed_model.clone(),
    )))
}

pub async fn run_ingest(
    config: &Config,
    file: &Path,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
) -> anyhow::Result<()> {
    let splitter = TextSplitter::new(SplitterConfig {
        chunk_size: chunk_size.unwrap_or(config.chunking.chunk_size),
        chunk_overlap: chunk_overlap.unwrap_or(config.chunking.chunk_overlap),
    })?;

    let pipeline = IngestionPipeline::new(splitter, gemini_client(config)?, &config.index.path);
    let report = pipeline.ingest_file(file).await?;

    println!(
        "Ingested {} document(s) as {} chunk(s) (vectors of dimension {}); index saved to {}",
        report.documents, report.chunks, report.dimension, config.index.path
    );
    Ok(())
}

pub async fn run_ask(config: &Config, question: &str, k: Option<usize>) -> anyhow::Result<String> {
    let client = gemini_client(config)?;
    let k = k.unwrap_or(config.retrieval.top_k);

    let retriever = Retriever::new(&config.index.path, client.clone());
    let hits = retriever.retrieve(question, k).await?;

    for hit in &hits {
        tracing::debug!(score = hit.score, source = %hit.chunk.metadata.source, "context chunk");
    }

    let chunks: Vec<_> = hits.into_iter().map(|h| h.chunk).collect();
    let composer = AnswerComposer::new(client);
    let answer = composer.answer(question, &chunks).await?;
    Ok(answer)
}

/// Question loop. A failed question reports its error and leaves the loop
/// running; only empty input exits.
pub async fn run_chat(config: &Config, k: Option<usize>) -> anyhow::Result<()> {
    loop {
        let question: String = Input::new()
            .with_prompt("Question (empty to exit)")
            .allow_empty(true)
            .interact_text()?;

        if question.trim().is_empty() {
            return Ok(());
        }

        match run_ask(config, &question, k).await {
            Ok(answer) => println!("\n{answer}\n"),
            Err(e) => eprintln!("error: {e:#}"),
        }
    }
}
