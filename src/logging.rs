//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "CADENCE_LOG";

const DEFAULT_FILTER: &str = "cadence=info";

/// Installs a stderr fmt subscriber filtered by `CADENCE_LOG`.
///
/// Calling it again is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
