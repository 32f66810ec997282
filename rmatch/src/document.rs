//! Plain-text extraction from application documents.

use std::path::{Path, PathBuf};

use rcommon::BoxFuture;

use crate::MatchError;

pub trait DocumentReader: Send + Sync + std::fmt::Debug {
    fn read_text<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<String, MatchError>>;
}

/// Reads PDF files on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfDocumentReader;

impl PdfDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PdfDocumentReader {
    fn read_text<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<String, MatchError>> {
        let owned: PathBuf = path.to_path_buf();
        Box::pin(async move {
            let shown = owned.display().to_string();
            tracing::debug!(path = %shown, "extracting pdf text");

            let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
                .await
                .map_err(|err| MatchError::document(format!("pdf reader task failed: {err}")))?
                .map_err(|err| MatchError::document(format!("failed to read '{shown}': {err}")))?;

            Ok(text.trim().to_string())
        })
    }
}
