//! Nullable telemetry — canned IP addresses and fingerprints.

use vigil_telemetry::{DeviceFingerprinter, IpResolver, TelemetryError};

/// An IP resolver that returns a fixed address, or fails.
pub struct NullIpResolver {
    ip: Option<String>,
}

impl NullIpResolver {
    pub fn returning(ip: impl Into<String>) -> Self {
        Self { ip: Some(ip.into()) }
    }

    /// A resolver whose lookup always fails.
    pub fn failing() -> Self {
        Self { ip: None }
    }
}

impl IpResolver for NullIpResolver {
    async fn resolve_ip(&self) -> Result<String, TelemetryError> {
        self.ip
            .clone()
            .ok_or_else(|| TelemetryError::Unreachable("null resolver".into()))
    }
}

/// A fingerprinter that returns a fixed fingerprint, or fails.
pub struct NullFingerprinter {
    fingerprint: Option<String>,
}

impl NullFingerprinter {
    pub fn returning(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: Some(fingerprint.into()),
        }
    }

    pub fn failing() -> Self {
        Self { fingerprint: None }
    }
}

impl DeviceFingerprinter for NullFingerprinter {
    fn fingerprint(&self) -> Result<String, TelemetryError> {
        self.fingerprint
            .clone()
            .ok_or(TelemetryError::Missing("device fingerprint"))
    }
}
