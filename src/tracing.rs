//! Logging setup for binaries
//!
//! The library itself only emits `tracing` events; this installs a subscriber.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=regsheet::render=trace` - per-frame render decisions
//!
//! # Log Files
//!
//! Logs are written to `~/.config/regsheet/logs/regsheet.log` with daily
//! rotation, or to an explicit directory. File logging uses debug level.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// `log_dir` overrides the default logs directory under the config dir.
pub fn init(log_dir: Option<&Path>) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let logs_dir = match log_dir {
        Some(dir) => crate::config_paths::ensure_dir(dir).map(|()| dir.to_path_buf()),
        None => crate::config_paths::ensure_logs_dir(),
    };

    // File layer - always debug level for troubleshooting
    let file_layer = match logs_dir {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "regsheet.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
