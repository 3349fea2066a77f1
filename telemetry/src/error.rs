use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry source unreachable: {0}")]
    Unreachable(String),

    #[error("telemetry request failed: {0}")]
    RequestFailed(String),

    #[error("invalid telemetry response: {0}")]
    InvalidResponse(String),

    #[error("no {0} available")]
    Missing(&'static str),
}
