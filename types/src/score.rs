//! Risk score type.
//!
//! Scores are fixed-point basis points (10_000 = 1.0) so that rule
//! contributions and the suspicion threshold compare exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A non-negative fraud risk score in basis points.
///
/// Uncapped: contributions are summed, so values above 1.0 are possible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RiskScore(u32);

impl RiskScore {
    pub const ZERO: Self = Self(0);

    /// Basis points per 1.0.
    pub const SCALE: u32 = 10_000;

    pub const fn from_bps(bps: u32) -> Self {
        Self(bps)
    }

    pub fn bps(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Real-number view of the score (e.g. `1.7`).
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Add for RiskScore {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}
