//! Shared setup for the experiment binaries.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG`, falling back to
/// `info`.
pub fn init_logging() {
    let filter
        = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Optional path to a JSON config, taken from the first command-line argument.
pub fn config_arg() -> Option<PathBuf> {
    std::env::args_os().nth(1).map(PathBuf::from)
}
