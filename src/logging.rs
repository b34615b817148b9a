//! Logging setup
//!
//! `tracing` with an environment-driven filter: set `RUST_LOG` to raise or
//! lower verbosity (e.g. `RUST_LOG=region_scan=debug`); defaults to `info`.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global subscriber for the binary
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize a verbose subscriber for tests; safe to call repeatedly
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
