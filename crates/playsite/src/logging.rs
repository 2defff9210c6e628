//! Tracing subscriber setup for binaries built on playsite.

use tracing_subscriber::EnvFilter;

/// Installs a formatted `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when it is set and parses; otherwise
/// `default_directive` is used (e.g. `"playsite=info"`). Calling this more
/// than once, or after another subscriber was installed, does nothing.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
