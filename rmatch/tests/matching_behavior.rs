use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use rchat::ChatSessionFactory;
use rcommon::{BoxFuture, FixedSeedSource};
use rmatch::prelude::*;
use rprovider::adapters::openai::{
    OpenAiFinishReason, OpenAiRequest, OpenAiResponse, OpenAiRole, OpenAiTransport, OpenAiUsage,
};
use rprovider::{ChatOptions, CredentialStore, ProviderError, ProviderFuture, SecretString};

#[derive(Debug, Default)]
struct ScriptedOpenAi {
    answers: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<OpenAiRequest>>,
}

impl ScriptedOpenAi {
    fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|answer| answer.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("requests lock")
            .iter()
            .map(|request| {
                request
                    .messages
                    .iter()
                    .rev()
                    .find(|message| message.role == OpenAiRole::User)
                    .map(|message| message.content.clone())
                    .expect("every request carries a user prompt")
            })
            .collect()
    }
}

impl OpenAiTransport for ScriptedOpenAi {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        _api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            let content = self
                .answers
                .lock()
                .expect("answers lock")
                .pop_front()
                .ok_or_else(|| ProviderError::other("no scripted answer left"))?;

            Ok(OpenAiResponse {
                model: "gpt-4-1106-preview".to_string(),
                created: Some(1_700_000_000),
                content: Some(content),
                finish_reason: OpenAiFinishReason::Stop,
                usage: OpenAiUsage::default(),
            })
        })
    }
}

#[derive(Debug, Default)]
struct InMemoryDocuments {
    texts: HashMap<String, String>,
}

impl InMemoryDocuments {
    fn with(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(path.to_string(), text.to_string());
        self
    }
}

impl DocumentReader for InMemoryDocuments {
    fn read_text<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<String, MatchError>> {
        Box::pin(async move {
            self.texts
                .get(path.to_string_lossy().as_ref())
                .cloned()
                .ok_or_else(|| MatchError::document(format!("no document at {}", path.display())))
        })
    }
}

fn factory(transport: Arc<ScriptedOpenAi>) -> Arc<ChatSessionFactory> {
    let mut credentials = CredentialStore::new();
    credentials
        .set_openai_api_key("sk-test")
        .expect("openai key should be accepted");

    Arc::new(
        ChatSessionFactory::builder(credentials)
            .with_openai_transport(transport)
            .with_seed_source(Arc::new(FixedSeedSource::new(7)))
            .build()
            .expect("factory should build"),
    )
}

fn options() -> ChatOptions {
    ChatOptions::new("gpt-4-turbo").with_temperature(0.0)
}

#[tokio::test]
async fn extraction_merges_the_first_object_over_empty_requirements() {
    let transport = Arc::new(ScriptedOpenAi::with_answers(&[
        r#"Sure. [1] {"hardSkills": ["Rust", "Tokio"], "languages": ["English"]} {"education": ["PhD"]}"#,
    ]));
    let extractor = RequirementExtractor::new(factory(transport.clone()), options());

    let requirements = extractor
        .extract_from_text("  Backend engineer in Berlin.  ")
        .await
        .expect("extraction should succeed");

    assert_eq!(requirements.hard_skills, vec!["Rust", "Tokio"]);
    assert_eq!(requirements.languages, vec!["English"]);
    assert!(requirements.education.is_empty());

    let prompts = transport.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("should be extracted: Backend engineer in Berlin."));
}

#[tokio::test]
async fn extraction_without_json_yields_empty_requirements() {
    let transport = Arc::new(ScriptedOpenAi::with_answers(&["I could not find any."]));
    let extractor = RequirementExtractor::new(factory(transport), options());

    let requirements = extractor
        .extract_from_text("Cook")
        .await
        .expect("extraction should succeed");

    assert!(requirements.is_empty());
}

#[tokio::test]
async fn empty_job_description_is_rejected_before_any_prompt() {
    let transport = Arc::new(ScriptedOpenAi::default());
    let extractor = RequirementExtractor::new(factory(transport.clone()), options());

    let error = extractor
        .extract_from_text("   ")
        .await
        .expect_err("empty description should fail");

    assert_eq!(error.kind, MatchErrorKind::InvalidInput);
    assert!(transport.prompts().is_empty());
}

#[tokio::test]
async fn matching_scores_each_requirement_on_a_fresh_session() {
    let transport = Arc::new(ScriptedOpenAi::with_answers(&[
        r#"{"requirement": "ignored", "score": 150, "explanation": "Ten years of Rust."}"#,
        r#"Result: {"score": 40, "explanation": "Some exposure."}"#,
        "No idea.",
        r#"{"promising": true, "explanation": "Strong Rust background."}"#,
    ]));
    let requirements = Requirements::new()
        .with(RequirementCategory::Languages, "German")
        .with(RequirementCategory::HardSkills, "Rust")
        .with(RequirementCategory::HardSkills, "Kubernetes");
    let matcher = RequirementMatcher::new(factory(transport.clone()), options()).with_weights(
        CategoryWeights::new().with_weight(RequirementCategory::HardSkills, 2.0),
    );

    let result = matcher
        .match_documents(&requirements, Some("Resume body"), None)
        .await
        .expect("matching should succeed");

    assert_eq!(
        result.scores(RequirementCategory::HardSkills),
        [
            RequirementScore::new("Rust", 100.0, "Ten years of Rust."),
            RequirementScore::new("Kubernetes", 40.0, "Some exposure."),
        ]
    );
    assert_eq!(
        result.scores(RequirementCategory::Languages),
        [RequirementScore::new("German", 0.0, "")]
    );
    assert!((result.total_score - 140.0 / 3.0).abs() < 1e-9);
    assert!(result.promising);
    assert_eq!(result.explanation, "Strong Rust background.");

    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 4);
    for request in requests.iter() {
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, OpenAiRole::System);
    }
    drop(requests);

    let prompts = transport.prompts();
    assert!(prompts[0].contains(r#"{"requirement":"Rust","score":0,"explanation":""}"#));
    assert!(prompts[2].contains(r#"{"requirement":"German","score":0,"explanation":""}"#));
    assert!(prompts[0].ends_with("scored and explained: Resume body."));
    assert!(!prompts[0].contains("cover letter"));
    assert!(prompts[3].starts_with("Please report if the following candidate is promising"));
    assert!(prompts[3].contains(
        r#"{"requirement":"Kubernetes","score":40,"explanation":"Some exposure."}"#
    ));
}

#[tokio::test]
async fn unpromising_verdict_is_reported_with_its_explanation() {
    let transport = Arc::new(ScriptedOpenAi::with_answers(&[
        r#"{"score": 10, "explanation": "Never used Go."}"#,
        r#"Verdict: {"promising": false, "explanation": "Core skill missing."}"#,
    ]));
    let requirements = Requirements::new().with(RequirementCategory::HardSkills, "Go");
    let matcher = RequirementMatcher::new(factory(transport.clone()), options());

    let result = matcher
        .match_documents(&requirements, Some("Python developer"), None)
        .await
        .expect("matching should succeed");

    assert_eq!(result.total_score, 10.0);
    assert!(!result.promising);
    assert_eq!(result.explanation, "Core skill missing.");
    assert_eq!(transport.prompts().len(), 2);
}

#[tokio::test]
async fn verdict_without_json_is_not_promising() {
    let transport = Arc::new(ScriptedOpenAi::with_answers(&[
        r#"{"score": 95, "explanation": "Fluent."}"#,
        "Hard to say.",
    ]));
    let requirements = Requirements::new().with(RequirementCategory::Languages, "English");
    let matcher = RequirementMatcher::new(factory(transport), options());

    let result = matcher
        .match_documents(&requirements, None, Some("Dear team"))
        .await
        .expect("matching should succeed");

    assert_eq!(result.total_score, 95.0);
    assert!(!result.promising);
    assert!(result.explanation.is_empty());
}

#[tokio::test]
async fn no_requirements_means_no_prompts_and_no_verdict() {
    let transport = Arc::new(ScriptedOpenAi::default());
    let matcher = RequirementMatcher::new(factory(transport.clone()), options());

    let result = matcher
        .match_documents(&Requirements::new(), Some("Resume body"), None)
        .await
        .expect("matching should succeed");

    assert!(result.is_empty());
    assert_eq!(result.total_score, 0.0);
    assert!(!result.promising);
    assert!(transport.prompts().is_empty());
}

#[tokio::test]
async fn matching_requires_at_least_one_document() {
    let transport = Arc::new(ScriptedOpenAi::default());
    let matcher = RequirementMatcher::new(factory(transport.clone()), options());
    let requirements = Requirements::new().with(RequirementCategory::Travel, "50% travel");

    let error = matcher
        .match_documents(&requirements, None, Some("  "))
        .await
        .expect_err("no documents should fail");

    assert_eq!(error.kind, MatchErrorKind::InvalidInput);
    assert!(transport.prompts().is_empty());
}

#[tokio::test]
async fn match_pdfs_reads_documents_then_extracts_and_scores() {
    let transport = Arc::new(ScriptedOpenAi::with_answers(&[
        r#"{"softSkills": ["Teamwork"]}"#,
        r#"{"score": 90, "explanation": "Led a team."}"#,
        r#"{"promising": true, "explanation": "Good lead."}"#,
    ]));
    let documents = Arc::new(
        InMemoryDocuments::default()
            .with("job.pdf", "Team lead wanted.")
            .with("cover.pdf", "I led a team of five."),
    );
    let matcher = RequirementMatcher::new(factory(transport.clone()), options())
        .with_document_reader(documents);

    let result = matcher
        .match_pdfs(Path::new("job.pdf"), None, Some(Path::new("cover.pdf")))
        .await
        .expect("matching should succeed");

    assert_eq!(result.total_score, 90.0);
    assert!(result.promising);
    assert_eq!(
        result.scores(RequirementCategory::SoftSkills),
        [RequirementScore::new("Teamwork", 90.0, "Led a team.")]
    );

    let prompts = transport.prompts();
    assert!(prompts[0].ends_with("extracted: Team lead wanted."));
    assert!(prompts[1].ends_with("explained: I led a team of five."));
}

#[tokio::test]
async fn unreadable_documents_surface_as_document_errors() {
    let transport = Arc::new(ScriptedOpenAi::default());
    let matcher = RequirementMatcher::new(factory(transport), options())
        .with_document_reader(Arc::new(InMemoryDocuments::default()));

    let error = matcher
        .match_pdfs(Path::new("missing.pdf"), Some(Path::new("resume.pdf")), None)
        .await
        .expect_err("missing documents should fail");

    assert_eq!(error.kind, MatchErrorKind::Document);
}

#[tokio::test]
async fn chat_failures_surface_as_chat_errors() {
    let transport = Arc::new(ScriptedOpenAi::default());
    let extractor = RequirementExtractor::new(factory(transport), options());

    let error = extractor
        .extract_from_text("Cook")
        .await
        .expect_err("empty script should fail the turn");

    assert_eq!(error.kind, MatchErrorKind::Chat);
}
