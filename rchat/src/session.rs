//! Ordered, append-only conversation bound to one provider.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rcommon::FixedSeedSource;
//! use rchat::{ChatErrorKind, ChatSession};
//! use rprovider::{
//!     ChatMessage, ChatOptions, ChatProvider, ModelId, ProviderError, ProviderFuture,
//!     ProviderId, ProviderReply, ResolvedChatOptions,
//! };
//!
//! struct Echo;
//!
//! impl ChatProvider for Echo {
//!     fn id(&self) -> ProviderId {
//!         ProviderId::OpenAi
//!     }
//!
//!     fn send_history<'a>(
//!         &'a self,
//!         history: &'a [ChatMessage],
//!         _options: &'a ResolvedChatOptions,
//!     ) -> ProviderFuture<'a, Result<ProviderReply, ProviderError>> {
//!         let last = history.last().map(|m| m.text().to_string()).unwrap_or_default();
//!         Box::pin(async move { Ok(ProviderReply::new(last)) })
//!     }
//! }
//!
//! let options = ChatOptions::new("gpt-4-turbo").materialize(ModelId::Gpt4Turbo, &FixedSeedSource::new(1));
//! let mut session = ChatSession::new(Arc::new(Echo), Arc::new(options));
//! session.set_context("Repeat after me.").expect("empty session accepts context");
//!
//! let error = session.set_context("again").expect_err("context can only be set once");
//! assert_eq!(error.kind, ChatErrorKind::State);
//! assert_eq!(session.history(true).len(), 1);
//! ```

use std::sync::Arc;

use chrono::Utc;
use rcommon::SessionId;
use rprovider::{
    ChatMessage, ChatProvider, GenerationSpan, ModelId, ProviderId, ResolvedChatOptions, Role,
};

use crate::{ChatError, ChatTurnHooks, NoopTurnHooks, TurnInfo};

pub struct ChatSession {
    id: SessionId,
    provider: Arc<dyn ChatProvider>,
    options: Arc<ResolvedChatOptions>,
    history: Vec<ChatMessage>,
    hooks: Arc<dyn ChatTurnHooks>,
}

impl ChatSession {
    /// Starts an empty session; use [`ChatSession::set_context`] to add the system prompt.
    pub fn new(provider: Arc<dyn ChatProvider>, options: Arc<ResolvedChatOptions>) -> Self {
        Self {
            id: SessionId::generate(),
            provider,
            options,
            history: Vec::new(),
            hooks: Arc::new(NoopTurnHooks),
        }
    }

    pub fn with_id(mut self, id: impl Into<SessionId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ChatTurnHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> ModelId {
        self.options.model
    }

    pub fn provider(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn options(&self) -> &ResolvedChatOptions {
        &self.options
    }

    /// Only allowed while the history is empty.
    pub fn set_context(&mut self, text: impl AsRef<str>) -> Result<(), ChatError> {
        if self.context().is_some() {
            return Err(ChatError::state("context already set"));
        }

        if !self.history.is_empty() {
            return Err(ChatError::state("history not empty"));
        }

        self.history.push(ChatMessage::system(text, Utc::now()));
        Ok(())
    }

    pub fn context(&self) -> Option<&ChatMessage> {
        self.history
            .iter()
            .rev()
            .find(|message| message.role() == Role::System)
    }

    /// Records the question, sends the whole history, and records the answer.
    ///
    /// On failure the question stays in the history and no model message is added.
    pub async fn ask(&mut self, question: impl AsRef<str>) -> Result<ChatMessage, ChatError> {
        let before = Utc::now();
        self.history.push(ChatMessage::user(question, before));

        let turn = TurnInfo {
            session_id: &self.id,
            provider: self.provider.id(),
            model: self.options.model,
            turn: self
                .history
                .iter()
                .filter(|message| message.role() == Role::User)
                .count(),
        };
        self.hooks.on_turn_start(&turn);
        tracing::debug!(
            session_id = %turn.session_id,
            provider = %turn.provider,
            turn = turn.turn,
            "chat turn started"
        );
        tracing::trace!(
            session_id = %turn.session_id,
            prompt = self.history.last().map(ChatMessage::text),
            "chat prompt"
        );

        let reply = self
            .provider
            .send_history(&self.history, &self.options)
            .await;
        let after = Utc::now();

        match reply {
            Ok(reply) => {
                let span = GenerationSpan::new(before, after);
                let message =
                    ChatMessage::model(reply.text, reply.created_at.unwrap_or(after), span);
                self.history.push(message.clone());

                self.hooks.on_turn_success(&turn, &message, span);
                tracing::debug!(
                    session_id = %turn.session_id,
                    turn = turn.turn,
                    elapsed_ms = span.duration().num_milliseconds(),
                    "chat turn finished"
                );
                Ok(message)
            }
            Err(err) => {
                let error = ChatError::from(err);
                let elapsed = (after - before).to_std().unwrap_or_default();

                self.hooks.on_turn_failure(&turn, &error, elapsed);
                tracing::debug!(
                    session_id = %turn.session_id,
                    turn = turn.turn,
                    error = %error,
                    "chat turn failed"
                );
                Err(error)
            }
        }
    }

    /// Same as [`ChatSession::ask`].
    pub async fn send(&mut self, prompt: impl AsRef<str>) -> Result<ChatMessage, ChatError> {
        self.ask(prompt).await
    }

    pub fn history(&self, include_context: bool) -> Vec<ChatMessage> {
        self.history
            .iter()
            .filter(|message| include_context || message.role() != Role::System)
            .cloned()
            .collect()
    }

    pub fn user_history(&self) -> Vec<ChatMessage> {
        self.filtered(Role::User)
    }

    pub fn model_history(&self) -> Vec<ChatMessage> {
        self.filtered(Role::Model)
    }

    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.last_with_role(Role::User)
    }

    pub fn last_model_message(&self) -> Option<&ChatMessage> {
        self.last_with_role(Role::Model)
    }

    fn filtered(&self, role: Role) -> Vec<ChatMessage> {
        self.history
            .iter()
            .filter(|message| message.role() == role)
            .cloned()
            .collect()
    }

    fn last_with_role(&self, role: Role) -> Option<&ChatMessage> {
        self.history
            .iter()
            .rev()
            .find(|message| message.role() == role)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("provider", &self.provider.id())
            .field("model", &self.options.model)
            .field("messages", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use rcommon::FixedSeedSource;
    use rprovider::{
        ChatOptions, ProviderError, ProviderFuture, ProviderReply, DEFAULT_SYSTEM_CONTEXT,
    };

    use super::*;
    use crate::ChatErrorKind;

    #[derive(Default)]
    struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<ProviderReply, ProviderError>>>,
        seen_lengths: Mutex<Vec<usize>>,
    }

    impl ScriptedProvider {
        fn replying(replies: Vec<Result<ProviderReply, ProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                seen_lengths: Mutex::new(Vec::new()),
            })
        }
    }

    impl ChatProvider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            ProviderId::OpenAi
        }

        fn send_history<'a>(
            &'a self,
            history: &'a [ChatMessage],
            _options: &'a ResolvedChatOptions,
        ) -> ProviderFuture<'a, Result<ProviderReply, ProviderError>> {
            Box::pin(async move {
                self.seen_lengths
                    .lock()
                    .expect("lengths lock")
                    .push(history.len());
                self.replies
                    .lock()
                    .expect("replies lock")
                    .pop_front()
                    .unwrap_or_else(|| Err(ProviderError::other("no scripted reply")))
            })
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ChatTurnHooks for RecordingHooks {
        fn on_turn_start(&self, turn: &TurnInfo<'_>) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{}", turn.turn));
        }

        fn on_turn_success(&self, turn: &TurnInfo<'_>, reply: &ChatMessage, _span: GenerationSpan) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{}:{}", turn.turn, reply.text()));
        }

        fn on_turn_failure(&self, turn: &TurnInfo<'_>, error: &ChatError, _elapsed: Duration) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{}:{:?}", turn.turn, error.kind));
        }
    }

    fn options() -> Arc<ResolvedChatOptions> {
        Arc::new(
            ChatOptions::new("gpt-4-turbo")
                .materialize(ModelId::Gpt4Turbo, &FixedSeedSource::new(1)),
        )
    }

    fn session_with(provider: Arc<ScriptedProvider>) -> ChatSession {
        let mut session = ChatSession::new(provider, options());
        session
            .set_context(DEFAULT_SYSTEM_CONTEXT)
            .expect("fresh session accepts context");
        session
    }

    #[test]
    fn set_context_twice_fails_without_touching_history() {
        let mut session = session_with(ScriptedProvider::replying(vec![]));

        let error = session
            .set_context("another")
            .expect_err("second context should fail");

        assert_eq!(error.kind, ChatErrorKind::State);
        assert_eq!(error.message, "context already set");
        assert_eq!(session.history(true).len(), 1);
        assert_eq!(
            session.context().map(ChatMessage::text),
            Some(DEFAULT_SYSTEM_CONTEXT)
        );
    }

    #[tokio::test]
    async fn set_context_after_a_turn_fails() {
        let provider = ScriptedProvider::replying(vec![Ok(ProviderReply::new("hi"))]);
        let mut session = ChatSession::new(provider, options());
        session.ask("hello").await.expect("turn should succeed");

        let error = session
            .set_context("late")
            .expect_err("context after turn should fail");

        assert_eq!(error.kind, ChatErrorKind::State);
        assert_eq!(error.message, "history not empty");
        assert_eq!(session.history(true).len(), 2);
        assert!(session.context().is_none());
    }

    #[test]
    fn context_is_trimmed_and_instantaneous() {
        let mut session = ChatSession::new(ScriptedProvider::replying(vec![]), options());
        session
            .set_context("  Be brief.  ")
            .expect("context should set");

        let context = session.context().expect("context should exist").clone();
        assert_eq!(context.text(), "Be brief.");
        assert!(context.generation_span().is_instant());
        assert_eq!(session.context(), Some(&context));
        assert_eq!(session.context(), Some(&context));
    }

    #[tokio::test]
    async fn turns_alternate_after_context() {
        let provider = ScriptedProvider::replying(vec![
            Ok(ProviderReply::new("one")),
            Ok(ProviderReply::new("two")),
            Ok(ProviderReply::new("three")),
        ]);
        let mut session = session_with(provider.clone());

        for question in ["a", "b", "c"] {
            session.ask(question).await.expect("turn should succeed");
        }

        let history = session.history(true);
        let roles = history.iter().map(ChatMessage::role).collect::<Vec<_>>();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Model,
                Role::User,
                Role::Model,
                Role::User,
                Role::Model
            ]
        );
        assert_eq!(session.history(false).len(), 6);
        assert_eq!(
            *provider.seen_lengths.lock().expect("lengths lock"),
            vec![2, 4, 6]
        );
    }

    #[tokio::test]
    async fn ask_trims_and_returns_model_message() {
        let provider = ScriptedProvider::replying(vec![Ok(ProviderReply::new("  Hi there!  "))]);
        let mut session = session_with(provider);

        let reply = session.ask("  Hello \n").await.expect("turn should succeed");

        assert_eq!(reply.role(), Role::Model);
        assert_eq!(reply.text(), "Hi there!");
        assert_eq!(session.user_history().len(), 1);
        assert_eq!(session.user_history()[0].text(), "Hello");
        assert_eq!(session.model_history().len(), 1);
        assert_eq!(session.last_model_message(), Some(&reply));
    }

    #[tokio::test]
    async fn model_message_spans_the_request() {
        let provider = ScriptedProvider::replying(vec![Ok(ProviderReply::new("ok"))]);
        let mut session = session_with(provider);

        let reply = session.ask("time me").await.expect("turn should succeed");
        let question = session
            .last_user_message()
            .expect("question should be recorded")
            .clone();

        assert_eq!(reply.generation_span().start(), question.created_at());
        assert!(reply.generation_span().end() >= reply.generation_span().start());
        assert_eq!(reply.created_at(), reply.generation_span().end());
    }

    #[tokio::test]
    async fn provider_reported_time_becomes_created_at() {
        let reported = Utc.with_ymd_and_hms(2023, 11, 6, 18, 0, 0).unwrap();
        let provider = ScriptedProvider::replying(vec![Ok(
            ProviderReply::new("ok").with_created_at(reported)
        )]);
        let mut session = session_with(provider);

        let reply = session.send("when?").await.expect("turn should succeed");

        assert_eq!(reply.created_at(), reported);
    }

    #[tokio::test]
    async fn failed_turn_keeps_question_and_adds_no_answer() {
        let provider = ScriptedProvider::replying(vec![Err(ProviderError::invalid_response(
            "OpenAI completion returned no content",
        ))]);
        let mut session = session_with(provider);

        let error = session.ask("Hello").await.expect_err("turn should fail");

        assert_eq!(error.kind, ChatErrorKind::ProviderResponse);
        assert_eq!(session.history(true).len(), 2);
        assert_eq!(
            session.last_user_message().map(ChatMessage::text),
            Some("Hello")
        );
        assert!(session.last_model_message().is_none());
        assert!(session.model_history().is_empty());
    }

    #[tokio::test]
    async fn transport_failures_are_classified() {
        let provider =
            ScriptedProvider::replying(vec![Err(ProviderError::authentication("bad key"))]);
        let mut session = session_with(provider);

        let error = session.ask("Hello").await.expect_err("turn should fail");

        assert_eq!(error.kind, ChatErrorKind::Transport);
    }

    #[tokio::test]
    async fn hooks_observe_each_turn() {
        let provider = ScriptedProvider::replying(vec![
            Ok(ProviderReply::new("fine")),
            Err(ProviderError::invalid_response("empty")),
        ]);
        let hooks = Arc::new(RecordingHooks::default());
        let mut session = session_with(provider).with_hooks(hooks.clone());

        session.ask("first").await.expect("first turn should succeed");
        session.ask("second").await.expect_err("second turn should fail");

        assert_eq!(
            *hooks.events.lock().expect("events lock"),
            vec![
                "start:1".to_string(),
                "success:1:fine".to_string(),
                "start:2".to_string(),
                "failure:2:ProviderResponse".to_string(),
            ]
        );
    }

    #[test]
    fn empty_session_has_no_last_messages() {
        let session = ChatSession::new(ScriptedProvider::replying(vec![]), options());

        assert!(session.history(true).is_empty());
        assert!(session.last_user_message().is_none());
        assert!(session.last_model_message().is_none());
        assert!(session.context().is_none());
        assert_eq!(session.provider(), ProviderId::OpenAi);
        assert_eq!(session.model(), ModelId::Gpt4Turbo);
    }

    #[tokio::test]
    async fn shared_session_serializes_turns_behind_a_mutex() {
        let provider = ScriptedProvider::replying(vec![
            Ok(ProviderReply::new("r1")),
            Ok(ProviderReply::new("r2")),
        ]);
        let session = Arc::new(tokio::sync::Mutex::new(session_with(provider)));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.lock().await.ask("q1").await })
        };
        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.lock().await.ask("q2").await })
        };
        first
            .await
            .expect("task should join")
            .expect("turn should succeed");
        second
            .await
            .expect("task should join")
            .expect("turn should succeed");

        let session = session.lock().await;
        let roles = session
            .history(false)
            .iter()
            .map(ChatMessage::role)
            .collect::<Vec<_>>();
        assert_eq!(roles, vec![Role::User, Role::Model, Role::User, Role::Model]);
    }
}
