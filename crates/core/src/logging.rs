//! Structured logging infrastructure for Safeguard.
//!
//! Centralized logging initialization with support for human-readable and
//! structured JSON output, configured through the environment.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialize the logging system with structured output.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level. Does nothing if a global subscriber
/// is already installed.
///
/// # Example
/// ```no_run
/// use safeguard_core::logging;
///
/// logging::init();
/// tracing::info!("Alert engine started");
/// ```
pub fn init() {
    let _ = try_init();
}

/// Like [`init`], but reports whether a subscriber was already installed.
pub fn try_init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .try_init()
}

/// Initialize the logging system with JSON output for production environments.
///
/// # Example
/// ```no_run
/// use safeguard_core::logging;
///
/// logging::init_json();
/// tracing::info!(component = "dispatch", "Dispatcher ready");
/// ```
pub fn init_json() {
    let _ = try_init_json();
}

/// Like [`init_json`], but reports whether a subscriber was already installed.
pub fn try_init_json() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_target(true).with_thread_ids(true))
        .try_init()
}
