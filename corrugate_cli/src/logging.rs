//! Tracing subscriber setup.
//!
//! Log lines go to stderr so stdout carries only JSON results.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging from `RUST_LOG` (default `info`).
///
/// ```no_run
/// corrugate_cli::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Debug-level logging captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
