//! Logging configuration for talk2data.
//!
//! The crate logs through `tracing`; embedding applications can either
//! install their own subscriber or call [`init_stderr_logging`].

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// Respects `RUST_LOG` for filtering, defaulting to `info`.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
