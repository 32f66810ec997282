use std::path::Path;
use std::sync::Arc;

use rchat::ChatSessionFactory;
use rprovider::ChatOptions;

use crate::{
    CategoryWeights, DocumentReader, MatchError, MatchResult, PdfDocumentReader,
    PromisingVerdict, RequirementExtractor, RequirementScore, Requirements, first_json_object,
    prompts::{match_prompt, present, promising_prompt},
};

/// Scores every requirement against a candidate's application documents.
///
/// Each requirement is asked about on its own fresh session, one after the
/// other in category order. A last fresh session gives the overall verdict
/// on the scored result.
#[derive(Debug, Clone)]
pub struct RequirementMatcher {
    factory: Arc<ChatSessionFactory>,
    options: ChatOptions,
    reader: Arc<dyn DocumentReader>,
    weights: CategoryWeights,
}

impl RequirementMatcher {
    pub fn new(factory: Arc<ChatSessionFactory>, options: ChatOptions) -> Self {
        Self {
            factory,
            options,
            reader: Arc::new(PdfDocumentReader),
            weights: CategoryWeights::default(),
        }
    }

    pub fn with_document_reader(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    pub async fn match_documents(
        &self,
        requirements: &Requirements,
        resume: Option<&str>,
        cover_letter: Option<&str>,
    ) -> Result<MatchResult, MatchError> {
        let resume = present(resume);
        let cover_letter = present(cover_letter);
        if resume.is_none() && cover_letter.is_none() {
            return Err(MatchError::invalid_input(
                "a resume or a cover letter is required",
            ));
        }

        let mut result = MatchResult::new();
        for (category, category_requirements) in requirements.iter() {
            for requirement in category_requirements {
                let prompt = match_prompt(requirement, category, resume, cover_letter);
                let mut session = self.factory.create(&self.options)?;
                let answer = session.ask(prompt).await?;

                let object = first_json_object(answer.text());
                let score = RequirementScore::from_json_object(requirement, object.as_ref());
                tracing::debug!(
                    session_id = %session.id(),
                    category = %category,
                    score = score.score,
                    "requirement scored"
                );
                result.push(category, score);
            }
        }

        result.total_score = result.compute_total_score(&self.weights);
        if !result.is_empty() {
            let verdict = self.verdict(&result).await?;
            result.apply_verdict(verdict);
        }
        tracing::info!(
            requirements = requirements.len(),
            total_score = result.total_score,
            promising = result.promising,
            "application matched"
        );
        Ok(result)
    }

    async fn verdict(&self, result: &MatchResult) -> Result<PromisingVerdict, MatchError> {
        let mut session = self.factory.create(&self.options)?;
        let answer = session.ask(promising_prompt(result)).await?;

        let object = first_json_object(answer.text());
        if object.is_none() {
            tracing::warn!(session_id = %session.id(), "verdict answer had no json object");
        }
        Ok(PromisingVerdict::from_json_object(object.as_ref()))
    }

    /// Reads the documents, extracts the job's requirements and matches them.
    pub async fn match_pdfs(
        &self,
        job_description: &Path,
        resume: Option<&Path>,
        cover_letter: Option<&Path>,
    ) -> Result<MatchResult, MatchError> {
        if resume.is_none() && cover_letter.is_none() {
            return Err(MatchError::invalid_input(
                "a resume or a cover letter is required",
            ));
        }

        let requirements = RequirementExtractor::new(self.factory.clone(), self.options.clone())
            .with_document_reader(self.reader.clone())
            .extract_from_pdf(job_description)
            .await?;

        let resume = match resume {
            Some(path) => Some(self.reader.read_text(path).await?),
            None => None,
        };
        let cover_letter = match cover_letter {
            Some(path) => Some(self.reader.read_text(path).await?),
            None => None,
        };

        self.match_documents(&requirements, resume.as_deref(), cover_letter.as_deref())
            .await
    }
}
