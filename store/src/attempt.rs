//! Attempt-log storage trait.

use crate::StoreError;
use vigil_types::{ScoredAttempt, Timestamp};

/// Append-only log of scored vote attempts. There is no update or delete.
///
/// Implementations must be shareable across concurrent evaluations.
pub trait AttemptStore: Send + Sync {
    /// Append a record.
    fn insert(&self, record: &ScoredAttempt) -> Result<(), StoreError>;

    /// All records with `timestamp >= lower_bound`, in no particular order.
    fn query_window(&self, lower_bound: Timestamp) -> Result<Vec<ScoredAttempt>, StoreError>;

    /// The newest `limit` records, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<ScoredAttempt>, StoreError>;

    /// The newest `limit` records accepted by `filter`, newest first.
    ///
    /// Walks the log from the newest record and stops as soon as `limit`
    /// matches are collected.
    fn recent_matching(
        &self,
        limit: usize,
        filter: &dyn Fn(&ScoredAttempt) -> bool,
    ) -> Result<Vec<ScoredAttempt>, StoreError>;

    /// Total number of records in the log.
    fn attempt_count(&self) -> Result<u64, StoreError>;
}

impl<S: AttemptStore + ?Sized> AttemptStore for std::sync::Arc<S> {
    fn insert(&self, record: &ScoredAttempt) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn query_window(&self, lower_bound: Timestamp) -> Result<Vec<ScoredAttempt>, StoreError> {
        (**self).query_window(lower_bound)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ScoredAttempt>, StoreError> {
        (**self).recent(limit)
    }

    fn recent_matching(
        &self,
        limit: usize,
        filter: &dyn Fn(&ScoredAttempt) -> bool,
    ) -> Result<Vec<ScoredAttempt>, StoreError> {
        (**self).recent_matching(limit, filter)
    }

    fn attempt_count(&self) -> Result<u64, StoreError> {
        (**self).attempt_count()
    }
}
