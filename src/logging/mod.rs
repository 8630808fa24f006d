//! Tracing subscriber initialization.
//!
//! The TUI owns the terminal, so logs go to a file. Follow them with
//! `tail -f` in another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the global tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. Creates the log
/// directory if it doesn't exist.
///
/// # Errors
///
/// Returns [`LoggingError`] if the path is unusable, the directory cannot
/// be created, or a subscriber was already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = prepare_log_location(log_path)?;
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// Split `log_path` into directory and file name, creating the directory.
///
/// A bare file name logs into the current directory.
fn prepare_log_location(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?
        .to_string();

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    Ok((directory, file_name))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prepare_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let log_file = temp.path().join("nested").join("deeper").join("coursechat.log");

        let (dir, name) = prepare_log_location(&log_file).unwrap();

        assert!(dir.is_dir(), "Log directory should be created: {:?}", dir);
        assert_eq!(name, "coursechat.log");
    }

    #[test]
    fn bare_file_name_logs_into_current_directory() {
        let (dir, name) = prepare_log_location(Path::new("coursechat.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "coursechat.log");
    }

    #[test]
    fn path_without_file_name_is_invalid() {
        let err = prepare_log_location(Path::new("/")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidPath(_)));
    }

    #[test]
    fn directory_blocked_by_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = prepare_log_location(&blocker.join("app.log")).unwrap_err();

        assert!(matches!(err, LoggingError::DirectoryCreation { .. }));
    }

    #[test]
    #[serial(tracing_init)]
    fn events_are_written_to_the_log_file() {
        let temp = TempDir::new().unwrap();
        let (dir, name) = prepare_log_location(&temp.path().join("app.log")).unwrap();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
            .with_writer(tracing_appender::rolling::never(&dir, &name))
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(chats = 2, "Chat session ready");
            tracing::debug!("filtered out at info");
        });

        let contents = fs::read_to_string(dir.join(name)).unwrap();
        assert!(contents.contains("Chat session ready"));
        assert!(contents.contains("chats=2"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    #[serial(tracing_init)]
    fn session_start_is_logged_once() {
        let temp = TempDir::new().unwrap();
        let (dir, name) = prepare_log_location(&temp.path().join("start.log")).unwrap();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
            .with_writer(tracing_appender::rolling::never(&dir, &name))
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let store = Box::new(crate::store::MemoryStore::new());
            let _session = crate::state::ChatSession::restore(store, 4);
        });

        let contents = fs::read_to_string(dir.join(name)).unwrap();
        assert_eq!(contents.matches("Chat session ready").count(), 1);
        assert!(contents.contains("capacity=4"));
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let temp = TempDir::new().unwrap();
        let log_file = temp.path().join("init.log");

        // The first call may already have happened in another test.
        let _ = init(&log_file);

        assert!(matches!(
            init(&log_file),
            Err(LoggingError::SubscriberAlreadySet)
        ));
    }
}
