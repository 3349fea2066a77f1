//! LMDB storage backend for the vote-attempt audit log.
//!
//! Implements [`vigil_store::AttemptStore`] using the `heed` LMDB bindings.
//! Records are keyed by recording time so that window queries are range scans.

pub mod attempt;
pub mod environment;
pub mod error;

pub use attempt::LmdbAttemptStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
