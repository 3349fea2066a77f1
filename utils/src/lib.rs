//! Shared utilities for the vigil workspace.

pub mod logging;
pub mod time;

pub use logging::{init_tracing, LogFormat};
pub use time::{format_age, format_duration};
