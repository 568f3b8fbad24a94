//! Tracing setup shared by the muster binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing at the default `info` level.
///
/// `RUST_LOG` overrides the level as usual.
pub fn init() {
    init_with_level("info")
}

/// Initialize tracing with the given default level, compact single-line
/// output. `RUST_LOG` still wins when set.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Initialize tracing for tests, writing through the test capture
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
