//! Validation errors raised while assembling a vote attempt.

use thiserror::Error;

/// A vote attempt could not be built from the caller's inputs.
///
/// These are caller errors, not fraud signals: they are raised before any
/// storage interaction and never produce an audit record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("missing voter address")]
    MissingVoterAddress,

    #[error("missing election id")]
    MissingElectionId,

    #[error("missing account id")]
    MissingAccountId,
}
