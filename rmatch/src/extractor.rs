use std::path::Path;
use std::sync::Arc;

use rchat::ChatSessionFactory;
use rprovider::ChatOptions;

use crate::{
    DocumentReader, MatchError, PdfDocumentReader, Requirements, first_json_object,
    prompts::{extraction_prompt, present},
};

/// Turns a job description into categorized requirements with one prompt.
#[derive(Debug, Clone)]
pub struct RequirementExtractor {
    factory: Arc<ChatSessionFactory>,
    options: ChatOptions,
    reader: Arc<dyn DocumentReader>,
}

impl RequirementExtractor {
    pub fn new(factory: Arc<ChatSessionFactory>, options: ChatOptions) -> Self {
        Self {
            factory,
            options,
            reader: Arc::new(PdfDocumentReader),
        }
    }

    pub fn with_document_reader(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    /// An answer without any JSON object yields empty requirements.
    pub async fn extract_from_text(&self, job_description: &str) -> Result<Requirements, MatchError> {
        let job_description = present(Some(job_description))
            .ok_or_else(|| MatchError::invalid_input("job description is empty"))?;

        let mut session = self.factory.create(&self.options)?;
        let answer = session.ask(extraction_prompt(job_description)).await?;

        let requirements = first_json_object(answer.text())
            .map(|object| Requirements::from_json_object(&object))
            .unwrap_or_default();

        tracing::debug!(
            session_id = %session.id(),
            requirements = requirements.len(),
            "requirements extracted"
        );
        Ok(requirements)
    }

    pub async fn extract_from_pdf(&self, path: &Path) -> Result<Requirements, MatchError> {
        let job_description = self.reader.read_text(path).await?;
        self.extract_from_text(&job_description).await
    }
}
