//! Best-effort telemetry collaborators for vote attempts.
//!
//! The fraud engine needs the caller's IP address and a device fingerprint, but
//! neither lookup is allowed to stop a vote: a failed lookup is normalized to
//! the documented sentinel ([`vigil_types::UNKNOWN_IP`],
//! [`vigil_types::UNKNOWN_DEVICE`]) by [`best_effort`].

pub mod device;
pub mod error;
pub mod ip;

pub use device::{ClientProfile, DeviceFingerprinter};
pub use error::TelemetryError;
pub use ip::{HttpIpResolver, IpResolver, StaticIpResolver};

use std::fmt;

/// Which telemetry value a reading belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TelemetryKind {
    IpAddress,
    DeviceFingerprint,
}

impl TelemetryKind {
    /// The value recorded when this kind of telemetry is unavailable.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Self::IpAddress => vigil_types::UNKNOWN_IP,
            Self::DeviceFingerprint => vigil_types::UNKNOWN_DEVICE,
        }
    }
}

impl fmt::Display for TelemetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpAddress => write!(f, "ip address"),
            Self::DeviceFingerprint => write!(f, "device fingerprint"),
        }
    }
}

/// Collapse a telemetry lookup into a value, substituting the sentinel on failure.
pub fn best_effort(kind: TelemetryKind, reading: Result<String, TelemetryError>) -> String {
    match reading {
        Ok(value) if !value.trim().is_empty() => value,
        Ok(_) => {
            tracing::warn!(telemetry = %kind, "empty telemetry value, using sentinel");
            kind.sentinel().to_string()
        }
        Err(e) => {
            tracing::warn!(telemetry = %kind, error = %e, "telemetry unavailable, using sentinel");
            kind.sentinel().to_string()
        }
    }
}
