pub mod error;
pub mod loader;
pub mod splitter;
pub mod types;

pub use error::DocumentError;
pub use loader::{CsvLoader, TextLoader};
pub use splitter::{SplitterConfig, TextSplitter};
pub use types::{Chunk, Document, DocumentMetadata};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &std::path::Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>,
    >;

    fn supported_extensions(&self) -> &[&str];
}

/// Load a file with the loader matching its extension.
///
/// All-or-nothing per file: any failure yields no documents.
///
/// # Errors
///
/// Returns [`DocumentError::UnsupportedFormat`] for an extension no loader
/// claims, or the loader's own error.
pub async fn load_path(path: &std::path::Path) -> Result<Vec<Document>, DocumentError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "txt" | "md" | "markdown" => TextLoader::default().load(path).await,
        "csv" => CsvLoader::default().load(path).await,
        #[cfg(feature = "pdf")]
        "pdf" => PdfLoader::default().load(path).await,
        other => Err(DocumentError::UnsupportedFormat(other.to_owned())),
    }
}
