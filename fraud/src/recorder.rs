//! Appends evaluated attempts to the audit log.

use std::sync::Arc;

use vigil_store::{AttemptStore, StoreError};
use vigil_types::{Assessment, Clock, ScoredAttempt, VoteAttempt};

/// Stamps an assessed attempt with the recording-side clock and appends it.
///
/// Called exactly once per evaluated attempt, whatever the outcome.
pub struct AttemptRecorder<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: AttemptStore> AttemptRecorder<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Persist the attempt and return the stored record.
    pub fn record(
        &self,
        attempt: VoteAttempt,
        assessment: Assessment,
    ) -> Result<ScoredAttempt, StoreError> {
        let record = ScoredAttempt::new(attempt, assessment, self.clock.now());
        self.store.insert(&record)?;
        tracing::debug!(
            voter = %record.attempt().voter_address(),
            election = %record.attempt().election_id(),
            timestamp = %record.timestamp(),
            "vote attempt recorded"
        );
        Ok(record)
    }
}
