//! Logging bootstrap
//!
//! Installs a `tracing` subscriber honouring `RUST_LOG`, falling back to the
//! configured level.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; repeated calls are no-ops so test binaries
/// can initialize logging independently.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
