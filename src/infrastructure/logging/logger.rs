use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

pub const LOG_FILE_PREFIX: &str = "avatar-widget.log";

/// Initialize the logger with file and console output.
///
/// The returned guard flushes the file writer when dropped and must be held
/// until the last log call.
pub fn init_logger(log_dir: &Path) -> Result<WorkerGuard, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|error| format!("Failed to create log directory {:?}: {}", log_dir, error))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true),
        )
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| format!("Failed to set global default subscriber: {}", error))?;

    tracing::debug!("Logger initialized");
    Ok(guard)
}

/// Log a debug message
pub fn debug(message: &str) {
    tracing::debug!("{}", message);
}

/// Log an info message
pub fn info(message: &str) {
    tracing::info!("{}", message);
}

/// Log a warning message
pub fn warn(message: &str) {
    tracing::warn!("{}", message);
}

/// Log an error message
pub fn error(message: &str) {
    let normalized = message.trim();
    if normalized.is_empty() {
        return;
    }
    tracing::error!("{}", normalized);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_guard_flushes_file_log() {
        let log_dir = std::env::temp_dir().join(format!("avatar-widget-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&log_dir);

        let guard = init_logger(&log_dir).unwrap();
        error("Avatar upload failed: connection reset");
        drop(guard);

        let contents: String = std::fs::read_dir(&log_dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
            .collect();
        assert!(contents.contains("Avatar upload failed: connection reset"));

        let _ = std::fs::remove_dir_all(&log_dir);
    }
}
