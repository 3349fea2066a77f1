//! Abstract storage for the vote-attempt audit log.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`AttemptStore`]. The fraud engine depends only on the trait.

pub mod attempt;
pub mod error;

pub use attempt::AttemptStore;
pub use error::StoreError;
