//! The fraud rule set.
//!
//! Three independent, additive rules evaluated in fixed order. Order only
//! affects the order of reasons; contributions are summed without a cap, so a
//! candidate tripping every rule scores 1.7.

use std::fmt;

use vigil_types::{Assessment, RiskScore, ScoredAttempt, VoteAttempt};

use crate::FraudConfig;

/// Contribution of the IP velocity rule.
pub const IP_VELOCITY_WEIGHT: RiskScore = RiskScore::from_bps(4_000);

/// Contribution of the device velocity rule.
pub const DEVICE_VELOCITY_WEIGHT: RiskScore = RiskScore::from_bps(4_000);

/// Contribution of the duplicate-vote rule. On its own it exceeds the default
/// suspicion threshold.
pub const DUPLICATE_VOTE_WEIGHT: RiskScore = RiskScore::from_bps(9_000);

/// A triggered rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Too many recent attempts from the candidate's IP address.
    IpVelocity { count: usize },
    /// Too many recent attempts from the candidate's device.
    DeviceVelocity { count: usize },
    /// The same voter already attempted a vote in the same election.
    DuplicateVote,
}

impl Signal {
    pub fn weight(&self) -> RiskScore {
        match self {
            Self::IpVelocity { .. } => IP_VELOCITY_WEIGHT,
            Self::DeviceVelocity { .. } => DEVICE_VELOCITY_WEIGHT,
            Self::DuplicateVote => DUPLICATE_VOTE_WEIGHT,
        }
    }
}

/// Human-readable reason, as recorded and shown to the voter.
impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpVelocity { count } => {
                write!(f, "High frequency of votes from IP ({count} attempts)")
            }
            Self::DeviceVelocity { count } => {
                write!(f, "High frequency of votes from device ({count} attempts)")
            }
            Self::DuplicateVote => write!(f, "User has already submitted a vote for this election"),
        }
    }
}

/// Pure scoring function over a candidate and a pre-filtered window.
///
/// No clock, no I/O, no hidden state: the same inputs always give the same
/// assessment.
#[derive(Clone, Debug)]
pub struct FraudScorer {
    max_attempts_per_ip: usize,
    max_attempts_per_device: usize,
    threshold: RiskScore,
}

impl FraudScorer {
    pub fn new(config: &FraudConfig) -> Self {
        Self {
            max_attempts_per_ip: config.max_attempts_per_ip,
            max_attempts_per_device: config.max_attempts_per_device,
            threshold: config.suspicion_threshold(),
        }
    }

    /// Rules triggered by `candidate`, in evaluation order.
    ///
    /// `recent` must already be restricted to the trailing window.
    pub fn signals(&self, candidate: &VoteAttempt, recent: &[ScoredAttempt]) -> Vec<Signal> {
        let mut signals = Vec::new();

        let ip_count = recent
            .iter()
            .filter(|r| r.attempt().ip_address() == candidate.ip_address())
            .count();
        if ip_count >= self.max_attempts_per_ip {
            signals.push(Signal::IpVelocity { count: ip_count });
        }

        let device_count = recent
            .iter()
            .filter(|r| r.attempt().device_fingerprint() == candidate.device_fingerprint())
            .count();
        if device_count >= self.max_attempts_per_device {
            signals.push(Signal::DeviceVelocity {
                count: device_count,
            });
        }

        if recent.iter().any(|r| r.attempt().same_ballot(candidate)) {
            signals.push(Signal::DuplicateVote);
        }

        signals
    }

    /// Score `candidate` against the window.
    pub fn score(&self, candidate: &VoteAttempt, recent: &[ScoredAttempt]) -> Assessment {
        let signals = self.signals(candidate, recent);
        let score = signals
            .iter()
            .fold(RiskScore::ZERO, |acc, s| acc + s.weight());
        let reasons = signals.iter().map(Signal::to_string).collect();
        Assessment::new(score, reasons, self.threshold)
    }
}
