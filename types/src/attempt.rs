//! Vote attempts and their scored audit records.

use crate::{AccountId, ElectionId, RiskScore, Timestamp, VoterAddress};
use serde::{Deserialize, Serialize};

/// Recorded in place of the IP address when it could not be obtained.
pub const UNKNOWN_IP: &str = "unknown_ip";

/// Recorded in place of the device fingerprint when it could not be obtained.
pub const UNKNOWN_DEVICE: &str = "unknown_device";

/// A prospective vote, as seen at the moment the submission is initiated.
///
/// Immutable once created. The timestamp is not part of the attempt: it is
/// assigned when the attempt is recorded (see [`ScoredAttempt`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteAttempt {
    voter_address: VoterAddress,
    election_id: ElectionId,
    ip_address: String,
    device_fingerprint: String,
    account_id: AccountId,
}

impl VoteAttempt {
    /// Build an attempt. Empty telemetry values are replaced by their sentinels.
    pub fn new(
        voter_address: VoterAddress,
        election_id: ElectionId,
        account_id: AccountId,
        ip_address: impl Into<String>,
        device_fingerprint: impl Into<String>,
    ) -> Self {
        let ip_address = non_empty_or(ip_address.into(), UNKNOWN_IP);
        let device_fingerprint = non_empty_or(device_fingerprint.into(), UNKNOWN_DEVICE);
        Self {
            voter_address,
            election_id,
            ip_address,
            device_fingerprint,
            account_id,
        }
    }

    pub fn voter_address(&self) -> &VoterAddress {
        &self.voter_address
    }

    pub fn election_id(&self) -> ElectionId {
        self.election_id
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn device_fingerprint(&self) -> &str {
        &self.device_fingerprint
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Whether `other` is a vote by the same voter in the same election.
    pub fn same_ballot(&self, other: &VoteAttempt) -> bool {
        self.voter_address == other.voter_address && self.election_id == other.election_id
    }
}

fn non_empty_or(value: String, sentinel: &str) -> String {
    if value.trim().is_empty() {
        sentinel.to_string()
    } else {
        value
    }
}

/// Outcome of scoring one attempt.
///
/// The threshold in force at scoring time is stored with the score, and
/// suspicion is always computed from the two; a decoded record cannot carry a
/// flag that disagrees with its score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    score: RiskScore,
    threshold: RiskScore,
    reasons: Vec<String>,
}

impl Assessment {
    pub fn new(score: RiskScore, reasons: Vec<String>, threshold: RiskScore) -> Self {
        debug_assert_eq!(score.is_zero(), reasons.is_empty());
        Self {
            score,
            threshold,
            reasons,
        }
    }

    pub fn score(&self) -> RiskScore {
        self.score
    }

    /// The suspicion threshold this attempt was scored against.
    pub fn threshold(&self) -> RiskScore {
        self.threshold
    }

    pub fn is_suspicious(&self) -> bool {
        self.score >= self.threshold
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }
}

/// The audit record of an evaluated attempt.
///
/// Append-only: once built, a scored attempt is never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAttempt {
    attempt: VoteAttempt,
    timestamp: Timestamp,
    assessment: Assessment,
}

impl ScoredAttempt {
    pub fn new(attempt: VoteAttempt, assessment: Assessment, timestamp: Timestamp) -> Self {
        Self {
            attempt,
            timestamp,
            assessment,
        }
    }

    pub fn attempt(&self) -> &VoteAttempt {
        &self.attempt
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn score(&self) -> RiskScore {
        self.assessment.score
    }

    pub fn is_suspicious(&self) -> bool {
        self.assessment.is_suspicious()
    }

    pub fn reasons(&self) -> &[String] {
        &self.assessment.reasons
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }
}
