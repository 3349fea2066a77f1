//! Identity handles carried by a vote attempt.

use crate::AttemptError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain account identifier of the voter (wallet address).
///
/// The format is opaque here; only emptiness is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterAddress(String);

impl VoterAddress {
    pub fn parse(raw: impl Into<String>) -> Result<Self, AttemptError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(AttemptError::MissingVoterAddress);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display: `0x1234...abcd`.
    ///
    /// Addresses too short to abbreviate are returned unchanged.
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity-provider user identifier.
///
/// Distinct from [`VoterAddress`]: one account may sign in with several wallets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, AttemptError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(AttemptError::MissingAccountId);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the election a vote is cast in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElectionId(u64);

impl ElectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
