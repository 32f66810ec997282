//! Structured logging setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILTER_VAR: &str = "RUBRIC_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs a global fmt subscriber.
///
/// The filter comes from `RUBRIC_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_LOG_FILTER`]. Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true))
        .try_init()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
