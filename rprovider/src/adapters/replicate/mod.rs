mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::{DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL, ReplicateProvider};
pub use transport::{ReplicateHttpTransport, ReplicateTransport};
pub use types::{PredictionStatus, ReplicateInput, ReplicatePrediction, ReplicateRequest};
