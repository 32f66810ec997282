//! Observability hooks for chat turns.
//!
//! ```rust
//! use robserve::{MetricsTurnHooks, SafeTurnHooks, TracingTurnHooks};
//!
//! let _tracing = SafeTurnHooks::new(TracingTurnHooks);
//! let _metrics = MetricsTurnHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsTurnHooks;
pub use safe_hooks::SafeTurnHooks;
pub use tracing_hooks::TracingTurnHooks;

pub mod prelude {
    pub use crate::{MetricsTurnHooks, SafeTurnHooks, TracingTurnHooks};
}
