//! Append-only log of unexpected failures.
//!
//! Callers hand messages to [`ErrorLog::record`], which never blocks and never
//! fails; a background task appends each one as `"<timestamp>: <message>"` to
//! the configured file.

use std::path::{Path, PathBuf};

use jiff::Zoned;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::logger::error::LoggerError;
use crate::logger::writer::create_parent_dir;

pub const DEFAULT_ERROR_LOG_PATH: &str = "logs/errorlog.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle to the error log writer task.
///
/// Cloning shares the same task. The task stops once every handle is dropped
/// and the queued entries are written.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    sender: Option<UnboundedSender<String>>,
}

impl ErrorLog {
    /// Starts the writer task for `path`. Must be called inside a tokio runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> (Self, JoinHandle<()>) {
        let path = path.into();
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(path, receiver));
        (
            Self {
                sender: Some(sender),
            },
            handle,
        )
    }

    /// A log that drops every entry.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| !s.is_closed())
    }

    /// Queues `message` for writing.
    pub fn record(&self, message: impl Into<String>) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(message.into()).is_err() {
            tracing::warn!(error = %LoggerError::Closed, "Dropping error log entry");
        }
    }
}

async fn run_writer(path: PathBuf, mut receiver: UnboundedReceiver<String>) {
    tracing::debug!(path = %path.display(), "Error log writer started");
    while let Some(message) = receiver.recv().await {
        let entry = format_entry(&Zoned::now(), &message);
        if let Err(e) = append_entry(&path, &entry).await {
            tracing::warn!(error = %e, "Failed to write error log entry");
        }
    }
    tracing::debug!(path = %path.display(), "Error log writer stopped");
}

async fn append_entry(path: &Path, entry: &str) -> Result<(), LoggerError> {
    create_parent_dir(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| LoggerError::io(path, e))?;
    file.write_all(entry.as_bytes())
        .await
        .map_err(|e| LoggerError::io(path, e))?;
    file.flush().await.map_err(|e| LoggerError::io(path, e))
}

fn format_entry(timestamp: &Zoned, message: &str) -> String {
    format!("{}: {}\n", timestamp.strftime(TIMESTAMP_FORMAT), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_entry() {
        let timestamp: Zoned = "2024-03-05T07:08:09[UTC]".parse().unwrap();
        assert_eq!(
            format_entry(&timestamp, "boom"),
            "2024-03-05 07:08:09: boom\n"
        );
    }

    #[tokio::test]
    async fn test_entries_are_appended_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("errorlog.txt");

        let (log, handle) = ErrorLog::spawn(&path);
        assert!(log.is_enabled());
        log.record("first failure");
        log.clone().record("second failure");
        drop(log);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first failure"));
        assert!(lines[1].ends_with(": second failure"));
    }

    #[tokio::test]
    async fn test_existing_file_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("errorlog.txt");
        std::fs::write(&path, "old entry\n").unwrap();

        let (log, handle) = ErrorLog::spawn(&path);
        log.record("new entry");
        drop(log);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("old entry\n"));
        assert!(contents.trim_end().ends_with(": new entry"));
    }

    #[tokio::test]
    async fn test_unwritable_path_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a file.
        let (log, handle) = ErrorLog::spawn(dir.path());
        log.record("lost");
        drop(log);
        handle.await.unwrap();
    }

    #[test]
    fn test_disabled_log_ignores_entries() {
        let log = ErrorLog::disabled();
        assert!(!log.is_enabled());
        log.record("ignored");
    }
}
