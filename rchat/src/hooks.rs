//! Lifecycle hooks for chat turns.
//!
//! ```rust
//! use rchat::{ChatTurnHooks, NoopTurnHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ChatTurnHooks) {}
//!
//! let hooks = NoopTurnHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use rcommon::SessionId;
use rprovider::{ChatMessage, GenerationSpan, ModelId, ProviderId};

use crate::ChatError;

/// Identifies one turn of one session.
#[derive(Debug, Clone, Copy)]
pub struct TurnInfo<'a> {
    pub session_id: &'a SessionId,
    pub provider: ProviderId,
    pub model: ModelId,
    /// 1-based count of user messages in the session, this one included.
    pub turn: usize,
}

pub trait ChatTurnHooks: Send + Sync {
    fn on_turn_start(&self, _turn: &TurnInfo<'_>) {}

    fn on_turn_success(&self, _turn: &TurnInfo<'_>, _reply: &ChatMessage, _span: GenerationSpan) {}

    fn on_turn_failure(&self, _turn: &TurnInfo<'_>, _error: &ChatError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTurnHooks;

impl ChatTurnHooks for NoopTurnHooks {}
