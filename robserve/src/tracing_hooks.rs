//! Tracing-based observability hooks for chat turns.
//!
//! ```rust
//! use rchat::ChatTurnHooks;
//! use robserve::TracingTurnHooks;
//!
//! fn accepts_turn_hooks(_hooks: &dyn ChatTurnHooks) {}
//!
//! let hooks = TracingTurnHooks;
//! accepts_turn_hooks(&hooks);
//! ```

use std::time::Duration;

use rchat::{ChatError, ChatTurnHooks, TurnInfo};
use rprovider::{ChatMessage, GenerationSpan};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTurnHooks;

impl ChatTurnHooks for TracingTurnHooks {
    fn on_turn_start(&self, turn: &TurnInfo<'_>) {
        tracing::info!(
            phase = "chat",
            event = "turn_start",
            session_id = %turn.session_id,
            provider = %turn.provider,
            model = %turn.model,
            turn = turn.turn
        );
    }

    fn on_turn_success(&self, turn: &TurnInfo<'_>, reply: &ChatMessage, span: GenerationSpan) {
        tracing::info!(
            phase = "chat",
            event = "turn_success",
            session_id = %turn.session_id,
            provider = %turn.provider,
            model = %turn.model,
            turn = turn.turn,
            reply_chars = reply.text().chars().count() as u64,
            elapsed_ms = span.duration().num_milliseconds()
        );
    }

    fn on_turn_failure(&self, turn: &TurnInfo<'_>, error: &ChatError, elapsed: Duration) {
        tracing::error!(
            phase = "chat",
            event = "turn_failure",
            session_id = %turn.session_id,
            provider = %turn.provider,
            model = %turn.model,
            turn = turn.turn,
            error_kind = ?error.kind,
            error = %error,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }
}
