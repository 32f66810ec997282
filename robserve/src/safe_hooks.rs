use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use rchat::{ChatError, ChatTurnHooks, TurnInfo};
use rprovider::{ChatMessage, GenerationSpan};

/// Swallows panics raised by the wrapped hooks so a faulty observer cannot fail a turn.
pub struct SafeTurnHooks<H> {
    inner: H,
}

impl<H> SafeTurnHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatTurnHooks for SafeTurnHooks<H>
where
    H: ChatTurnHooks,
{
    fn on_turn_start(&self, turn: &TurnInfo<'_>) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_turn_start(turn)));
    }

    fn on_turn_success(&self, turn: &TurnInfo<'_>, reply: &ChatMessage, span: GenerationSpan) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_success(turn, reply, span)
        }));
    }

    fn on_turn_failure(&self, turn: &TurnInfo<'_>, error: &ChatError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_failure(turn, error, elapsed)
        }));
    }
}
