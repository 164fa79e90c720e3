//! UI error types

use thiserror::Error;

/// Errors that end the explorer
#[derive(Debug, Error)]
pub enum UiError {
    /// IO error while driving the terminal
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The scan worker thread stopped unexpectedly
    #[error("Scan worker stopped")]
    WorkerStopped,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
