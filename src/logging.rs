//! File logging.
//!
//! The terminal belongs to the UI, so diagnostics go to a daily rolling log
//! file through a non-blocking writer. Filtering follows `RUST_LOG`, with
//! `cellkit=info` when it is unset or invalid.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file name prefix inside the log directory.
pub const LOG_FILE: &str = "cellkit.log";

const DEFAULT_FILTER: &str = "cellkit=info";

/// Keeps the background log writer alive. Dropping it flushes pending lines.
#[derive(Debug)]
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// The filter used when `RUST_LOG` does not provide one.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing under `dir`.
///
/// Returns `None` when the directory cannot be created or a global
/// subscriber is already installed.
pub fn init(dir: impl AsRef<Path>) -> Option<LoggingGuard> {
    let log_dir = dir.as_ref().to_path_buf();
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(env_filter()).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true),
    );
    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_fails_on_unusable_directory() {
        let file = std::env::temp_dir().join(format!("cellkit-log-{}", std::process::id()));
        std::fs::write(&file, b"not a directory").unwrap();
        assert!(init(file.join("nested")).is_none());
        let _ = std::fs::remove_file(&file);
    }
}
