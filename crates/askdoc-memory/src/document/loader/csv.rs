use std::collections::HashMap;
use std::path::Path;
use std::pin::Pin;

use super::super::{
    DEFAULT_MAX_FILE_SIZE, Document, DocumentError, DocumentLoader, DocumentMetadata,
};

/// One document per row; content renders each column as `"name: value"`
/// joined with `" | "`.
pub struct CsvLoader {
    pub max_file_size: u64,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for CsvLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let path = std::fs::canonicalize(&path)?;

            let meta = tokio::fs::metadata(&path).await?;
            if meta.len() > max_size {
                return Err(DocumentError::FileTooLarge(meta.len()));
            }

            let source = path.display().to_string();
            let path_buf = path.clone();
            tokio::task::spawn_blocking(move || read_rows(&path_buf, &source))
                .await
                .map_err(|e| {
                    DocumentError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
                })?
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["csv"]
    }
}

fn read_rows(path: &Path, source: &str) -> Result<Vec<Document>, DocumentError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut docs = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let content = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(" | ");

        let mut extra = HashMap::new();
        extra.insert("row".to_owned(), row.to_string());

        docs.push(Document {
            content,
            metadata: DocumentMetadata {
                source: source.to_owned(),
                content_type: "text/csv".to_owned(),
                extra,
            },
        });
    }

    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_document_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("people.csv");
        std::fs::write(&file, "name,age\nAlice,30\nBob,25\nCarol,41\n").unwrap();

        let docs = CsvLoader::default().load(&file).await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].content, "name: Alice | age: 30");
        assert_eq!(docs[2].content, "name: Carol | age: 41");
    }

    #[tokio::test]
    async fn row_index_in_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("t.csv");
        std::fs::write(&file, "a,b\n1,2\n3,4\n").unwrap();

        let docs = CsvLoader::default().load(&file).await.unwrap();
        assert_eq!(docs[0].metadata.extra.get("row").unwrap(), "0");
        assert_eq!(docs[1].metadata.extra.get("row").unwrap(), "1");
        assert_eq!(docs[0].metadata.content_type, "text/csv");
    }

    #[tokio::test]
    async fn quoted_fields_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("q.csv");
        std::fs::write(&file, "city,note\n\"Leeds, UK\",fine\n").unwrap();

        let docs = CsvLoader::default().load(&file).await.unwrap();
        assert_eq!(docs[0].content, "city: Leeds, UK | note: fine");
    }

    #[tokio::test]
    async fn header_only_file_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.csv");
        std::fs::write(&file, "name,age\n").unwrap();

        let docs = CsvLoader::default().load(&file).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn ragged_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.csv");
        std::fs::write(&file, "a,b\n1,2,3\n").unwrap();

        let result = CsvLoader::default().load(&file).await;
        assert!(matches!(result, Err(DocumentError::Csv(_))));
    }

    #[tokio::test]
    async fn load_nonexistent_file() {
        let result = CsvLoader::default()
            .load(Path::new("/nonexistent/data.csv"))
            .await;
        assert!(result.is_err());
    }
}
