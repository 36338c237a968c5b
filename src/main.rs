//! askdoc CLI: ingest one document, then ask questions against it.

mod init;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use askdoc_core::Config;

#[derive(Parser)]
#[command(
    name = "askdoc",
    version,
    about = "Ask questions of a PDF, CSV, or text file"
)]
struct Cli {
    /// Configuration file (environment variables override its values).
    #[arg(long, default_value = "askdoc.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load, chunk, and embed a file, then persist the index.
    Ingest {
        file: PathBuf,
        /// Chunk size in characters.
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Overlap between consecutive chunks, in characters.
        #[arg(long)]
        chunk_overlap: Option<usize>,
    },
    /// Ask one question against the persisted index.
    Ask {
        question: String,
        /// Number of context chunks to retrieve.
        #[arg(short)]
        k: Option<usize>,
    },
    /// Interactive question loop; empty input exits.
    Chat {
        /// Number of context chunks to retrieve.
        #[arg(short)]
        k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init::init_subscriber(&config.log_level);

    match cli.command {
        Command::Ingest {
            file,
            chunk_size,
            chunk_overlap,
        } => init::run_ingest(&config, &file, chunk_size, chunk_overlap).await,
        Command::Ask { question, k } => {
            let answer = init::run_ask(&config, &question, k).await?;
            println!("{answer}");
            Ok(())
        }
        Command::Chat { k } => init::run_chat(&config, k).await,
    }
}
