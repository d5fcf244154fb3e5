use std::fs::create_dir_all;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Installs the global tracing subscriber.
///
/// Always logs to a daily rolling file under `log_dir`; mirrors to stderr
/// when `log_to_stdout` is set. `LOG_LEVEL` is read as an `EnvFilter`
/// directive, falling back to `info`.
///
/// Keep the returned guard alive for the whole run or buffered file output
/// is lost.
pub fn init_logger(config: &AppConfig) -> WorkerGuard {
    let log_dir = Path::new(&config.log_dir);
    if !log_dir.exists() {
        create_dir_all(log_dir).ok();
    }

    let file_appender = rolling::daily(log_dir, &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);

    if config.log_to_stdout {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(console_layer).init();
    } else {
        registry.init();
    }

    guard
}
