//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the given level (default `info`)
//! applies to every target.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with(None, false);
}

/// Initialize the logger with a fallback level and optional JSON output
///
/// Calling it a second time is a no-op.
pub fn init_logger_with(level: Option<&str>, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LEVEL)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
