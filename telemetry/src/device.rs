//! Device fingerprinting from client-reported browser attributes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

use crate::TelemetryError;

type Blake2b256 = Blake2b<U32>;

/// Source of a device fingerprint for the current request.
pub trait DeviceFingerprinter: Send + Sync {
    fn fingerprint(&self) -> Result<String, TelemetryError>;
}

/// The client attributes a fingerprint is derived from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
}

impl ClientProfile {
    pub fn new(
        user_agent: impl Into<String>,
        language: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            language: language.into(),
            platform: platform.into(),
        }
    }

    fn is_empty(&self) -> bool {
        self.user_agent.trim().is_empty()
            && self.language.trim().is_empty()
            && self.platform.trim().is_empty()
    }
}

impl DeviceFingerprinter for ClientProfile {
    /// Hex Blake2b-256 of `"{user_agent}-{language}-{platform}"`.
    fn fingerprint(&self) -> Result<String, TelemetryError> {
        if self.is_empty() {
            return Err(TelemetryError::Missing("client profile"));
        }
        let material = format!("{}-{}-{}", self.user_agent, self.language, self.platform);
        let mut hasher = Blake2b256::new();
        hasher.update(material.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firefox() -> ClientProfile {
        ClientProfile::new("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0", "en-US", "Linux x86_64")
    }

    #[test]
    fn same_profile_same_fingerprint() {
        let a = firefox().fingerprint().unwrap();
        let b = firefox().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn language_changes_fingerprint() {
        let mut other = firefox();
        other.language = "de-DE".into();
        assert_ne!(firefox().fingerprint().unwrap(), other.fingerprint().unwrap());
    }

    #[test]
    fn empty_profile_is_unavailable() {
        let err = ClientProfile::default().fingerprint().unwrap_err();
        assert!(matches!(err, TelemetryError::Missing(_)));
    }
}
