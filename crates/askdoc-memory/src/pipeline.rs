use std::path::{Path, PathBuf};
use std::sync::Arc;

use askdoc_llm::Embedder;

use crate::document::{TextSplitter, load_path};
use crate::error::PipelineError;
use crate::index::VectorIndex;

/// Counts reported after a successful ingest, one per pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks: usize,
    pub dimension: usize,
}

/// One-file ingest: load, split, embed, index, persist.
pub struct IngestionPipeline {
    splitter: TextSplitter,
    embedder: Arc<dyn Embedder>,
    index_dir: PathBuf,
}

impl IngestionPipeline {
    #[must_use]
    pub fn new(
        splitter: TextSplitter,
        embedder: Arc<dyn Embedder>,
        index_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            splitter,
            embedder,
            index_dir: index_dir.into(),
        }
    }

    /// Run the full pipeline for one file and persist the resulting index,
    /// replacing any previous one.
    ///
    /// All-or-nothing: a failure at any stage leaves the previously
    /// persisted index untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, embedding, or persistence fails.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestReport, PipelineError> {
        let documents = load_path(path).await?;
        tracing::info!(path = %path.display(), documents = documents.len(), "loaded file");

        let chunks: Vec<_> = documents
            .iter()
            .flat_map(|doc| self.splitter.split(doc))
            .collect();
        tracing::info!(chunks = chunks.len(), "split documents");

        let report = IngestReport {
            documents: documents.len(),
            chunks: chunks.len(),
            dimension: 0,
        };

        let index = VectorIndex::build(chunks, self.embedder.as_ref())
            .await
            .map_err(PipelineError::Index)?;
        let dimension = index.dimension().unwrap_or(0);

        index.persist(&self.index_dir).map_err(PipelineError::Index)?;

        Ok(IngestReport {
            dimension,
            ..report
        })
    }
}

#[cfg(test)]
mod tests {
    use askdoc_llm::mock::MockEmbedder;

    use super::*;
    use crate::document::SplitterConfig;
    use crate::error::IndexError;

    fn pipeline(index_dir: &Path, embedder: MockEmbedder) -> IngestionPipeline {
        IngestionPipeline::new(
            TextSplitter::new(SplitterConfig::default()).unwrap(),
            Arc::new(embedder),
            index_dir,
        )
    }

    #[tokio::test]
    async fn ingest_text_file_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("doc.txt");
        std::fs::write(&file, "some short document").unwrap();

        let index_dir = dir.path().join("idx");
        let report = pipeline(&index_dir, MockEmbedder::default())
            .ingest_file(&file)
            .await
            .unwrap();

        assert_eq!(report.documents, 1);
        assert_eq!(report.chunks, 1);
        assert_eq!(report.dimension, 8);
        assert!(index_dir.join("index.json").is_file());
    }

    #[tokio::test]
    async fn embedding_failure_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("doc.txt");
        std::fs::write(&file, "content that will fail to embed").unwrap();

        let index_dir = dir.path().join("idx");
        let result = pipeline(&index_dir, MockEmbedder::failing())
            .ingest_file(&file)
            .await;

        assert!(matches!(
            result,
            Err(PipelineError::Index(IndexError::Embedding(_)))
        ));
        assert!(!index_dir.exists());
    }

    #[tokio::test]
    async fn unsupported_extension_fails_the_action() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("image.png");
        std::fs::write(&file, [0u8; 4]).unwrap();

        let result = pipeline(&dir.path().join("idx"), MockEmbedder::default())
            .ingest_file(&file)
            .await;
        assert!(matches!(result, Err(PipelineError::Load(_))));
    }

    #[tokio::test]
    async fn reingest_overwrites_index() {
        let dir = tempfile::tempdir().unwrap();
        let index_dir = dir.path().join("idx");
        let p = pipeline(&index_dir, MockEmbedder::default());

        let first = dir.path().join("a.txt");
        std::fs::write(&first, "first file").unwrap();
        p.ingest_file(&first).await.unwrap();

        let second = dir.path().join("b.txt");
        std::fs::write(&second, "second file").unwrap();
        p.ingest_file(&second).await.unwrap();

        let index = VectorIndex::restore(&index_dir).unwrap();
        assert_eq!(index.len(), 1);
    }
}
