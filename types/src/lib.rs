//! Fundamental types for vote-attempt fraud scoring.
//!
//! This crate defines the values shared across every other crate in the workspace:
//! voter/account/election identifiers, vote attempts and their scored audit records,
//! risk scores, timestamps, and the clock abstraction.

pub mod attempt;
pub mod error;
pub mod ids;
pub mod score;
pub mod time;

pub use attempt::{Assessment, ScoredAttempt, VoteAttempt, UNKNOWN_DEVICE, UNKNOWN_IP};
pub use error::AttemptError;
pub use ids::{AccountId, ElectionId, VoterAddress};
pub use score::RiskScore;
pub use time::{Clock, SystemClock, Timestamp};
