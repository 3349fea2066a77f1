//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::{LmdbAttemptStore, LmdbError};

/// Name of the attempt-log database inside the environment.
const ATTEMPTS_DB: &str = "vote_attempts";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    attempts_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path and
        // the memory map is never handed out beyond heed's own borrow rules.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let attempts_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some(ATTEMPTS_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            attempts_db,
        })
    }

    /// Handle to the vote-attempt log.
    pub fn attempt_store(&self) -> LmdbAttemptStore {
        LmdbAttemptStore {
            env: Arc::clone(&self.env),
            attempts_db: self.attempts_db,
        }
    }
}
