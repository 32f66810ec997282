//! Metrics-based observability hooks for chat turns.
//!
//! ```rust
//! use rchat::ChatTurnHooks;
//! use robserve::MetricsTurnHooks;
//!
//! fn accepts_turn_hooks(_hooks: &dyn ChatTurnHooks) {}
//!
//! let hooks = MetricsTurnHooks;
//! accepts_turn_hooks(&hooks);
//! ```

use std::time::Duration;

use rchat::{ChatError, ChatTurnHooks, TurnInfo};
use rprovider::{ChatMessage, GenerationSpan};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsTurnHooks;

impl ChatTurnHooks for MetricsTurnHooks {
    fn on_turn_start(&self, turn: &TurnInfo<'_>) {
        metrics::counter!(
            "rubric_chat_turn_start_total",
            "provider" => turn.provider.to_string(),
            "model" => turn.model.to_string()
        )
        .increment(1);
    }

    fn on_turn_success(&self, turn: &TurnInfo<'_>, _reply: &ChatMessage, span: GenerationSpan) {
        metrics::counter!(
            "rubric_chat_turn_success_total",
            "provider" => turn.provider.to_string(),
            "model" => turn.model.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "rubric_chat_turn_duration_seconds",
            "provider" => turn.provider.to_string(),
            "model" => turn.model.to_string()
        )
        .record(span.duration().to_std().unwrap_or_default().as_secs_f64());
    }

    fn on_turn_failure(&self, turn: &TurnInfo<'_>, error: &ChatError, elapsed: Duration) {
        metrics::counter!(
            "rubric_chat_turn_failure_total",
            "provider" => turn.provider.to_string(),
            "model" => turn.model.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "rubric_chat_turn_failure_duration_seconds",
            "provider" => turn.provider.to_string(),
            "model" => turn.model.to_string()
        )
        .record(elapsed.as_secs_f64());
    }
}
