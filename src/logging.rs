//! Diagnostic logging setup for the binary.
//!
//! The library emits `tracing` events; nothing is printed until a subscriber
//! is installed. [`init`] installs a compact fmt subscriber on stderr so log
//! lines never mix with the inventory printed on stdout.
//!
//! Filter precedence: `RUST_LOG` if set and valid, else the config's
//! `log.level`, else `info`.

use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
pub fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
