//! Logging initialization.
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init`], which installs a fmt subscriber filtered by
//! `CONCAT_MAPS_LOG` (same syntax as `RUST_LOG`, default `warn`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CONCAT_MAPS_LOG";

/// Install a stderr subscriber. Returns false if one was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
