//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, attempt storage, telemetry) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically, including injected failures
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod store;
pub mod telemetry;

pub use clock::NullClock;
pub use store::NullAttemptStore;
pub use telemetry::{NullFingerprinter, NullIpResolver};
