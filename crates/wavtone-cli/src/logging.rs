//! Logging setup.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a log level. Warnings are always shown.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the stderr subscriber. `RUST_LOG` directives are honored on top
/// of the verbosity level.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level_for(verbosity).into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
