//! Tunable thresholds of the fraud engine.

use serde::{Deserialize, Serialize};
use vigil_types::RiskScore;

use crate::ConfigError;

/// What the gate does when the attempt log cannot be read or written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePolicy {
    /// Refuse the vote: surface the storage failure to the caller.
    #[default]
    FailClosed,
    /// Keep voting available: score against an empty window on read failure,
    /// return the decision despite a failed write.
    FailOpen,
}

/// Fraud engine configuration.
///
/// Passed into the scorer and gate at construction; nothing is read from
/// global state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FraudConfig {
    /// Length of the trailing attempt window in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Same-IP attempts in the window at which the IP velocity rule fires.
    #[serde(default = "default_max_attempts")]
    pub max_attempts_per_ip: usize,

    /// Same-device attempts in the window at which the device velocity rule fires.
    #[serde(default = "default_max_attempts")]
    pub max_attempts_per_device: usize,

    /// Score (basis points) at or above which an attempt is blocked.
    #[serde(default = "default_suspicion_threshold_bps")]
    pub suspicion_threshold_bps: u32,

    #[serde(default)]
    pub storage_policy: StoragePolicy,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_window_secs() -> u64 {
    600
}

fn default_max_attempts() -> usize {
    5
}

fn default_suspicion_threshold_bps() -> u32 {
    8_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl FraudConfig {
    pub fn suspicion_threshold(&self) -> RiskScore {
        RiskScore::from_bps(self.suspicion_threshold_bps)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_secs == 0 {
            return Err(ConfigError::Invalid("window_secs must be positive".into()));
        }
        if self.max_attempts_per_ip == 0 {
            return Err(ConfigError::Invalid("max_attempts_per_ip must be positive".into()));
        }
        if self.max_attempts_per_device == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts_per_device must be positive".into(),
            ));
        }
        if self.suspicion_threshold_bps == 0 {
            return Err(ConfigError::Invalid(
                "suspicion_threshold_bps must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_attempts_per_ip: default_max_attempts(),
            max_attempts_per_device: default_max_attempts(),
            suspicion_threshold_bps: default_suspicion_threshold_bps(),
            storage_policy: StoragePolicy::default(),
        }
    }
}
