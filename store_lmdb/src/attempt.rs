//! LMDB implementation of AttemptStore.
//!
//! One database, `vote_attempts`: binary key `timestamp_ms_be_u64(8) ++ seq_be_u64(8)`
//! → bincode `ScoredAttempt`. Big-endian timestamps sort lexicographically by
//! time, so a window query is a range scan from the lower bound and the newest
//! records are a reverse iteration. The sequence number is the record count at
//! insert time, unique because LMDB serializes write transactions.

use std::ops::Bound;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use vigil_store::{AttemptStore, StoreError};
use vigil_types::{ScoredAttempt, Timestamp};

use crate::LmdbError;

const KEY_LEN: usize = 16;

pub struct LmdbAttemptStore {
    pub(crate) env: Arc<Env>,
    pub(crate) attempts_db: Database<Bytes, Bytes>,
}

/// Build the 16-byte key `timestamp_be ++ seq_be`.
fn attempt_key(timestamp: Timestamp, seq: u64) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    key[..8].copy_from_slice(&timestamp.as_millis().to_be_bytes());
    key[8..].copy_from_slice(&seq.to_be_bytes());
    key
}

fn decode(key: &[u8], val: &[u8]) -> Result<ScoredAttempt, LmdbError> {
    if key.len() != KEY_LEN {
        return Err(LmdbError::MalformedKey(key.len()));
    }
    Ok(bincode::deserialize(val)?)
}

impl LmdbAttemptStore {
    fn insert_inner(&self, record: &ScoredAttempt) -> Result<(), LmdbError> {
        let bytes = bincode::serialize(record)?;
        let mut wtxn = self.env.write_txn()?;
        let seq = self.attempts_db.len(&wtxn)?;
        let key = attempt_key(record.timestamp(), seq);
        self.attempts_db.put(&mut wtxn, &key[..], &bytes)?;
        wtxn.commit()?;
        Ok(())
    }

    fn window_inner(&self, lower_bound: Timestamp) -> Result<Vec<ScoredAttempt>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let lower = attempt_key(lower_bound, 0);
        let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (Bound::Included(&lower[..]), Bound::Unbounded);
        let mut results = Vec::new();
        for entry in self.attempts_db.range(&rtxn, &bounds)? {
            let (key, val) = entry?;
            results.push(decode(key, val)?);
        }
        Ok(results)
    }

    fn recent_inner(
        &self,
        limit: usize,
        filter: &dyn Fn(&ScoredAttempt) -> bool,
    ) -> Result<Vec<ScoredAttempt>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut results = Vec::with_capacity(limit.min(1024));
        if limit == 0 {
            return Ok(results);
        }
        for entry in self.attempts_db.rev_iter(&rtxn)? {
            let (key, val) = entry?;
            let record = decode(key, val)?;
            if filter(&record) {
                results.push(record);
                if results.len() == limit {
                    break;
                }
            }
        }
        Ok(results)
    }
}

impl AttemptStore for LmdbAttemptStore {
    fn insert(&self, record: &ScoredAttempt) -> Result<(), StoreError> {
        self.insert_inner(record).map_err(|e| {
            tracing::error!(error = %e, "failed to append vote attempt");
            StoreError::from(e)
        })
    }

    fn query_window(&self, lower_bound: Timestamp) -> Result<Vec<ScoredAttempt>, StoreError> {
        self.window_inner(lower_bound).map_err(StoreError::from)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ScoredAttempt>, StoreError> {
        self.recent_inner(limit, &|_: &ScoredAttempt| true).map_err(StoreError::from)
    }

    fn recent_matching(
        &self,
        limit: usize,
        filter: &dyn Fn(&ScoredAttempt) -> bool,
    ) -> Result<Vec<ScoredAttempt>, StoreError> {
        self.recent_inner(limit, filter).map_err(StoreError::from)
    }

    fn attempt_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.attempts_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;
    use vigil_types::{AccountId, Assessment, ElectionId, RiskScore, VoteAttempt, VoterAddress};

    /// Helper: open a temporary LMDB environment.
    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let env = LmdbEnvironment::open(dir.path(), 4, 10 * 1024 * 1024)
            .expect("failed to open env");
        (dir, env)
    }

    fn record(voter: &str, ip: &str, secs: u64) -> ScoredAttempt {
        let attempt = VoteAttempt::new(
            VoterAddress::parse(voter).unwrap(),
            ElectionId::new(7),
            AccountId::parse("acct").unwrap(),
            ip,
            "device",
        );
        let assessment = Assessment::new(RiskScore::ZERO, Vec::new(), RiskScore::from_bps(8_000));
        ScoredAttempt::new(attempt, assessment, Timestamp::from_secs(secs))
    }

    #[test]
    fn insert_and_query_window() {
        let (_dir, env) = temp_env();
        let store = env.attempt_store();

        store.insert(&record("0xa", "1.1.1.1", 1_000)).unwrap();
        store.insert(&record("0xb", "2.2.2.2", 1_500)).unwrap();

        let window = store.query_window(Timestamp::from_secs(900)).unwrap();
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn window_lower_bound_is_inclusive() {
        let (_dir, env) = temp_env();
        let store = env.attempt_store();

        store.insert(&record("0xold", "1.1.1.1", 399)).unwrap();
        store.insert(&record("0xedge", "1.1.1.1", 400)).unwrap();
        store.insert(&record("0xnew", "1.1.1.1", 1_000)).unwrap();

        let window = store.query_window(Timestamp::from_secs(400)).unwrap();
        let voters: Vec<&str> = window
            .iter()
            .map(|r| r.attempt().voter_address().as_str())
            .collect();
        assert_eq!(window.len(), 2);
        assert!(voters.contains(&"0xedge"));
        assert!(!voters.contains(&"0xold"));
    }

    #[test]
    fn same_instant_records_are_all_kept() {
        let (_dir, env) = temp_env();
        let store = env.attempt_store();

        for _ in 0..5 {
            store.insert(&record("0xa", "1.1.1.1", 2_000)).unwrap();
        }

        assert_eq!(store.attempt_count().unwrap(), 5);
        assert_eq!(store.query_window(Timestamp::from_secs(2_000)).unwrap().len(), 5);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let (_dir, env) = temp_env();
        let store = env.attempt_store();

        for secs in [100, 300, 200, 400] {
            store.insert(&record("0xa", "1.1.1.1", secs)).unwrap();
        }

        let recent = store.recent(3).unwrap();
        let times: Vec<u64> = recent.iter().map(|r| r.timestamp().as_secs()).collect();
        assert_eq!(times, vec![400, 300, 200]);
    }

    #[test]
    fn recent_matching_stops_after_limit() {
        let (_dir, env) = temp_env();
        let store = env.attempt_store();

        for secs in 1..=10 {
            let ip = if secs % 3 == 0 { "9.9.9.9" } else { "1.1.1.1" };
            store.insert(&record("0xa", ip, secs)).unwrap();
        }

        let visited = std::cell::Cell::new(0);
        let filter = |r: &ScoredAttempt| {
            visited.set(visited.get() + 1);
            r.attempt().ip_address() == "9.9.9.9"
        };
        let matched = store.recent_matching(2, &filter).unwrap();

        let times: Vec<u64> = matched.iter().map(|r| r.timestamp().as_secs()).collect();
        assert_eq!(times, vec![9, 6]);
        // 10, 9, 8, 7, 6 and nothing older.
        assert_eq!(visited.get(), 5);
        assert!(store.recent_matching(0, &filter).unwrap().is_empty());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 4, 1 << 20).unwrap();
            env.attempt_store().insert(&record("0xa", "1.1.1.1", 10)).unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 4, 1 << 20).unwrap();
        let store = env.attempt_store();
        assert_eq!(store.attempt_count().unwrap(), 1);
        assert_eq!(store.recent(10).unwrap()[0], record("0xa", "1.1.1.1", 10));
    }

    #[test]
    fn empty_store_returns_empty() {
        let (_dir, env) = temp_env();
        let store = env.attempt_store();

        assert!(store.query_window(Timestamp::EPOCH).unwrap().is_empty());
        assert!(store.recent(10).unwrap().is_empty());
        assert_eq!(store.attempt_count().unwrap(), 0);
    }
}
