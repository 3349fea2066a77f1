//! The vote gate: decides whether a vote submission may proceed.
//!
//! Per invocation: `Idle → Evaluating → {Blocked, Proceeding} → Idle`.
//! Evaluating means: assemble the candidate, read the trailing window, score,
//! and record the attempt. Recording always happens before branching on the
//! outcome, so blocked attempts still count toward later checks.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use vigil_store::AttemptStore;
use vigil_telemetry::{best_effort, DeviceFingerprinter, IpResolver, TelemetryError, TelemetryKind};
use vigil_types::{
    AccountId, Assessment, AttemptError, Clock, ElectionId, RiskScore, VoteAttempt, VoterAddress,
};

use crate::{
    AttemptRecorder, ConfigError, FraudConfig, FraudScorer, GateError, GateStats, GateStatsSnapshot,
    StoragePolicy,
};

/// Identity part of a vote submission, as supplied by the caller.
#[derive(Clone, Debug, Default)]
pub struct VoteRequest {
    pub voter_address: String,
    pub election_id: Option<u64>,
    pub account_id: String,
}

/// Everything the gate needs to assemble a candidate attempt.
///
/// Telemetry is carried as the raw lookup result; the gate normalizes failures
/// to sentinels when assembling.
#[derive(Debug)]
pub struct RawVoteInputs {
    pub request: VoteRequest,
    pub ip_address: Result<String, TelemetryError>,
    pub device_fingerprint: Result<String, TelemetryError>,
}

impl RawVoteInputs {
    /// Run both telemetry lookups for `request`. Never fails.
    pub async fn gather<I, D>(request: VoteRequest, ip: &I, device: &D) -> Self
    where
        I: IpResolver,
        D: DeviceFingerprinter,
    {
        Self {
            request,
            ip_address: ip.resolve_ip().await,
            device_fingerprint: device.fingerprint(),
        }
    }

    /// Validate the identity fields and build the candidate attempt.
    pub fn assemble(self) -> Result<VoteAttempt, AttemptError> {
        let voter_address = VoterAddress::parse(self.request.voter_address)?;
        let election_id = self
            .request
            .election_id
            .map(ElectionId::new)
            .ok_or(AttemptError::MissingElectionId)?;
        let account_id = AccountId::parse(self.request.account_id)?;

        let ip_address = best_effort(TelemetryKind::IpAddress, self.ip_address);
        let device_fingerprint = best_effort(TelemetryKind::DeviceFingerprint, self.device_fingerprint);

        Ok(VoteAttempt::new(
            voter_address,
            election_id,
            account_id,
            ip_address,
            device_fingerprint,
        ))
    }
}

/// Terminal state of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The caller may submit the vote.
    Proceeding,
    /// The caller must not submit the vote and should show the reasons.
    Blocked,
}

/// The gate's answer for one attempt.
///
/// Serializes `score` as a real number (`0.9`), not in basis points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub proceed: bool,
    #[serde(serialize_with = "serialize_score")]
    pub score: RiskScore,
    pub reasons: Vec<String>,
}

fn serialize_score<S: Serializer>(score: &RiskScore, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(score.as_f64())
}

impl Decision {
    fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            proceed: !assessment.is_suspicious(),
            score: assessment.score(),
            reasons: assessment.reasons().to_vec(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.proceed {
            Outcome::Proceeding
        } else {
            Outcome::Blocked
        }
    }

    /// Message to show a blocked voter; `None` when the vote proceeds.
    pub fn user_message(&self) -> Option<String> {
        if self.proceed {
            return None;
        }
        Some(format!(
            "Your vote attempt has been flagged as suspicious (Score: {:.1}). Reason(s): {}. Your vote may not be processed.",
            self.score.as_f64(),
            self.reasons.join(", ")
        ))
    }
}

/// Orchestrates scoring and recording for vote submissions.
///
/// Holds no per-voter state; concurrent evaluations only share the store.
pub struct VoteGate<S> {
    store: Arc<S>,
    recorder: AttemptRecorder<Arc<S>>,
    scorer: FraudScorer,
    clock: Arc<dyn Clock>,
    config: FraudConfig,
    stats: GateStats,
}

impl<S: AttemptStore> VoteGate<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: FraudConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            recorder: AttemptRecorder::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            scorer: FraudScorer::new(&config),
            clock,
            config,
            stats: GateStats::new(),
        })
    }

    pub fn config(&self) -> &FraudConfig {
        &self.config
    }

    /// Counters since construction.
    pub fn stats(&self) -> GateStatsSnapshot {
        self.stats.snapshot()
    }

    /// Evaluate one vote submission.
    ///
    /// `Ok` carries the decision; every `Err` means the vote must not be cast.
    /// Runs to completion once started: an attempt that was scored is always
    /// offered to the recorder.
    pub fn evaluate(&self, inputs: RawVoteInputs) -> Result<Decision, GateError> {
        let candidate = inputs.assemble()?;
        self.stats.evaluation_started();

        let now = self.clock.now();
        let lower_bound = now.window_start(self.config.window_secs);
        let window = match self.store.query_window(lower_bound) {
            Ok(window) => window,
            Err(e) => {
                self.stats.window_failed();
                match self.config.storage_policy {
                    StoragePolicy::FailClosed => {
                        tracing::error!(
                            voter = %candidate.voter_address(),
                            error = %e,
                            "attempt window unavailable, refusing vote"
                        );
                        return Err(GateError::WindowUnavailable(e));
                    }
                    StoragePolicy::FailOpen => {
                        tracing::warn!(
                            voter = %candidate.voter_address(),
                            error = %e,
                            "attempt window unavailable, scoring against empty window"
                        );
                        Vec::new()
                    }
                }
            }
        };

        let assessment = self.scorer.score(&candidate, &window);
        if assessment.is_suspicious() {
            tracing::info!(
                voter = %candidate.voter_address(),
                election = %candidate.election_id(),
                score = %assessment.score(),
                reasons = ?assessment.reasons(),
                window = window.len(),
                "vote attempt flagged as suspicious"
            );
        } else {
            tracing::debug!(
                voter = %candidate.voter_address(),
                election = %candidate.election_id(),
                score = %assessment.score(),
                window = window.len(),
                "vote attempt scored"
            );
        }

        let decision = Decision::from_assessment(&assessment);

        if let Err(e) = self.recorder.record(candidate, assessment) {
            self.stats.record_failed();
            match self.config.storage_policy {
                StoragePolicy::FailClosed => {
                    tracing::error!(error = %e, "vote attempt not recorded, asking caller to retry");
                    return Err(GateError::RecordFailed { decision, source: e });
                }
                StoragePolicy::FailOpen => {
                    tracing::error!(error = %e, "vote attempt not recorded, audit trail has a gap");
                }
            }
        }

        self.stats.decided(decision.outcome());
        Ok(decision)
    }
}
