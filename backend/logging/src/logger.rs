//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, a console layer
//! and an optional rolling file layer (NDJSON).

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix for rolling logs: `bridger.log.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "bridger.log";

/// Initialize the global structured logger.
///
/// `RUST_LOG` wins over `level` when set. Console output goes to stderr so
/// rendered text on stdout stays clean. Calling this twice is a no-op.
pub fn init_logger(level: &str, json: bool, log_dir: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });
    let console_json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));

    let file_layer = log_dir.map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(console_json_layer)
        .with(file_layer)
        .try_init();
}
