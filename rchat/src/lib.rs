//! Conversation state over a single chat provider.
//!
//! A [`ChatSession`] owns an append-only message history and hands the whole
//! history to its provider on every turn. [`ChatSessionFactory`] turns caller
//! options and explicit credentials into ready-to-use sessions.

mod error;
mod factory;
mod hooks;
mod session;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatSession, ChatSessionFactory, ChatSessionFactoryBuilder,
        ChatTurnHooks, NoopTurnHooks, TurnInfo,
    };
    pub use rcommon::SessionId;
    pub use rprovider::{ChatMessage, ChatOptions, CredentialStore, ModelId, Role};
}

pub use error::{ChatError, ChatErrorKind};
pub use factory::{ChatSessionFactory, ChatSessionFactoryBuilder, DEFAULT_HTTP_TIMEOUT};
pub use hooks::{ChatTurnHooks, NoopTurnHooks, TurnInfo};
pub use rcommon::SessionId;
pub use session::ChatSession;
