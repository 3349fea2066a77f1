//! Vote-time fraud scoring.
//!
//! Three pieces, leaf first:
//! - [`FraudScorer`]: a pure function from a candidate attempt and the recent
//!   attempt window to a score and the list of triggered reasons.
//! - [`AttemptRecorder`]: stamps and appends every evaluated attempt to the
//!   audit log, whatever the outcome.
//! - [`VoteGate`]: assembles the candidate, fetches the window, scores, records,
//!   and tells the caller whether to cast the vote.
//!
//! All history lives in the [`vigil_store::AttemptStore`]; nothing is cached
//! between evaluations, so evaluations may run concurrently.

pub mod config;
pub mod error;
pub mod gate;
pub mod recorder;
pub mod scorer;
pub mod stats;

pub use config::{FraudConfig, StoragePolicy};
pub use error::{ConfigError, GateError};
pub use gate::{Decision, Outcome, RawVoteInputs, VoteGate, VoteRequest};
pub use recorder::AttemptRecorder;
pub use scorer::{FraudScorer, Signal};
pub use stats::{GateStats, GateStatsSnapshot};
