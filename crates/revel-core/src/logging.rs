#![forbid(unsafe_code)]

//! Subscriber setup for hosts that want recognizer logs.
//!
//! The library itself only emits `tracing` events: `debug` for ignored input
//! and state transitions, `info` for recognized gestures, `warn` for rejected
//! settings. Installing a subscriber is the host's call; this module offers
//! the two formats we ship with.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Install a global subscriber filtered by `RUST_LOG`
/// (default `revel_core=info,revel_web=info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("revel_core=info,revel_web=info"));
    let builder = fmt().with_env_filter(filter).with_target(true);
    match format {
        LogFormat::Compact => builder.compact().try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
