use std::io;
use thiserror::Error;

/// Custom error type for termwatch
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Metrics provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Snapshot log error: {0}")]
    SnapshotLog(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

/// Result type alias for termwatch
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a provider-unavailable error. Aborts the current command only.
    pub fn provider_unavailable<S: Into<String>>(msg: S) -> Self {
        MonitorError::ProviderUnavailable(msg.into())
    }

    pub fn snapshot_log<S: Into<String>>(msg: S) -> Self {
        MonitorError::SnapshotLog(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        MonitorError::Tui(msg.into())
    }
}
