//! Evaluation counters for a running gate.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::Outcome;

/// Live counters, updated concurrently by evaluations.
#[derive(Debug, Default)]
pub struct GateStats {
    evaluated: AtomicU64,
    proceeded: AtomicU64,
    blocked: AtomicU64,
    window_failures: AtomicU64,
    record_failures: AtomicU64,
}

/// Point-in-time copy of [`GateStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GateStatsSnapshot {
    /// Attempts that passed validation and entered scoring.
    pub evaluated: u64,
    pub proceeded: u64,
    pub blocked: u64,
    /// Window reads that failed, under either storage policy.
    pub window_failures: u64,
    /// Record writes that failed, under either storage policy.
    pub record_failures: u64,
}

impl GateStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn evaluation_started(&self) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn decided(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Proceeding => &self.proceeded,
            Outcome::Blocked => &self.blocked,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn window_failed(&self) {
        self.window_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.record_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> GateStatsSnapshot {
        GateStatsSnapshot {
            evaluated: self.evaluated.load(Ordering::Relaxed),
            proceeded: self.proceeded.load(Ordering::Relaxed),
            blocked: self.blocked.load(Ordering::Relaxed),
            window_failures: self.window_failures.load(Ordering::Relaxed),
            record_failures: self.record_failures.load(Ordering::Relaxed),
        }
    }
}
