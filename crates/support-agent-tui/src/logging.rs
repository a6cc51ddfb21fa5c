//! Tracing subscriber initialization.
//!
//! The TUI owns the terminal, so logs go to a file instead. Follow them with
//! `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// `<cache_dir>/support-agent/support-agent.log`, or the temp dir when the
/// platform has no cache dir
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("support-agent")
        .join("support-agent.log")
}

/// Install a file-backed subscriber. Respects `RUST_LOG`, defaults to "info".
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let subscriber = file_subscriber(log_path)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// Build the file-backed subscriber without installing it, creating the log
/// directory if needed.
fn file_subscriber(
    log_path: &Path,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static, LoggingError> {
    use tracing_subscriber::EnvFilter;

    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_subscriber_creates_directory_and_writes_file() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("logs").join("agent.log");

        let subscriber = file_subscriber(&log_file).unwrap();
        assert!(dir.path().join("logs").is_dir());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(endpoint = "http://localhost/chat", "logging works");
        });

        let contents = std::fs::read_to_string(&log_file).unwrap();
        assert!(contents.contains("logging works"));
        assert!(contents.contains("http://localhost/chat"));
        // No terminal escapes in the file
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        let result = file_subscriber(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    fn test_default_log_path_file_name() {
        let path = default_log_path();
        assert_eq!(path.file_name().unwrap(), "support-agent.log");
    }
}
