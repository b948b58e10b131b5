//! Subscriber setup for binaries and demos.

use tracing_subscriber::EnvFilter;

/// Install a stdout `fmt` subscriber filtered by `RUST_LOG`, defaulting to `debug`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(std::io::stdout)
        .try_init()
        .is_ok()
}
