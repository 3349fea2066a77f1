//! Nullable store — thread-safe in-memory attempt log for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use vigil_store::{AttemptStore, StoreError};
use vigil_types::{ScoredAttempt, Timestamp};

/// An in-memory attempt log with switchable read/write failures.
pub struct NullAttemptStore {
    records: Mutex<Vec<ScoredAttempt>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl NullAttemptStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Pre-populate the log.
    pub fn with_records(records: Vec<ScoredAttempt>) -> Self {
        let store = Self::new();
        *store.records.lock().unwrap() = records;
        store
    }

    /// Make every subsequent window/recent query fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent insert fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all records in insertion order (for assertions).
    pub fn records(&self) -> Vec<ScoredAttempt> {
        self.records.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("null store: reads disabled".into()));
        }
        Ok(())
    }
}

impl Default for NullAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttemptStore for NullAttemptStore {
    fn insert(&self, record: &ScoredAttempt) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("null store: writes disabled".into()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn query_window(&self, lower_bound: Timestamp) -> Result<Vec<ScoredAttempt>, StoreError> {
        self.check_reads()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.timestamp() >= lower_bound)
            .cloned()
            .collect())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ScoredAttempt>, StoreError> {
        self.recent_matching(limit, &|_: &ScoredAttempt| true)
    }

    fn recent_matching(
        &self,
        limit: usize,
        filter: &dyn Fn(&ScoredAttempt) -> bool,
    ) -> Result<Vec<ScoredAttempt>, StoreError> {
        self.check_reads()?;
        let mut records = self.records.lock().unwrap().clone();
        // Stable sort keeps insertion order among equal timestamps; reverse
        // afterwards so the latest insert comes first.
        records.sort_by_key(|r| r.timestamp());
        records.reverse();
        records.retain(|r| filter(r));
        records.truncate(limit);
        Ok(records)
    }

    fn attempt_count(&self) -> Result<u64, StoreError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::{AccountId, Assessment, ElectionId, RiskScore, VoteAttempt, VoterAddress};

    fn record(voter: &str, secs: u64, bps: u32) -> ScoredAttempt {
        let attempt = VoteAttempt::new(
            VoterAddress::parse(voter).unwrap(),
            ElectionId::new(1),
            AccountId::parse("acct").unwrap(),
            "1.1.1.1",
            "dev",
        );
        let reasons = if bps == 0 { Vec::new() } else { vec!["dup".to_string()] };
        let assessment = Assessment::new(RiskScore::from_bps(bps), reasons, RiskScore::from_bps(8_000));
        ScoredAttempt::new(attempt, assessment, Timestamp::from_secs(secs))
    }

    #[test]
    fn recent_matching_filters_newest_first() {
        let store = NullAttemptStore::with_records(vec![
            record("0xa", 1, 9_000),
            record("0xb", 2, 0),
            record("0xc", 3, 9_000),
            record("0xd", 4, 9_000),
        ]);

        let suspicious = store
            .recent_matching(2, &|r: &ScoredAttempt| r.is_suspicious())
            .unwrap();
        let voters: Vec<&str> = suspicious
            .iter()
            .map(|r| r.attempt().voter_address().as_str())
            .collect();
        assert_eq!(voters, vec!["0xd", "0xc"]);

        store.fail_reads(true);
        assert!(store.recent_matching(2, &|_: &ScoredAttempt| true).is_err());
    }
}
