use thiserror::Error;
use vigil_store::StoreError;
use vigil_types::AttemptError;

use crate::gate::Decision;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid fraud config: {0}")]
    Invalid(String),
}

/// Why the gate could not hand back a plain decision.
///
/// Every variant means the vote must not be cast.
#[derive(Debug, Error)]
pub enum GateError {
    /// Caller error; raised before any storage interaction, nothing recorded.
    #[error("invalid vote attempt: {0}")]
    InvalidAttempt(#[from] AttemptError),

    /// The attempt history could not be read; the attempt was not scored.
    #[error("vote attempt history unavailable: {0}")]
    WindowUnavailable(#[source] StoreError),

    /// The attempt was scored but the audit record could not be written.
    #[error("vote attempt could not be recorded, please try again: {source}")]
    RecordFailed {
        decision: Decision,
        #[source]
        source: StoreError,
    },
}

impl GateError {
    /// Whether retrying the same attempt later may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidAttempt(_))
    }
}
