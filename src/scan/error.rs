//! Scan-specific error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while scanning a directory
///
/// Messages are kept as strings so a result can be shipped across the
/// scan worker channel and shown in the status bar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The process working directory could not be determined
    #[error("Failed to get current directory: {0}")]
    CurrentDir(String),

    /// The walk finished without yielding the requested root
    #[error("Root path not found in scan results: {0:?}")]
    MissingRoot(PathBuf),

    /// Scans start at directories only
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Any filesystem error other than permission denied
    #[error("IO error: {0}")]
    Io(String),

    /// Tag lookup failed while annotating entries
    #[error("Failed to read tags: {0}")]
    Tags(String),
}

impl From<crate::db::DbError> for ScanError {
    fn from(err: crate::db::DbError) -> Self {
        Self::Tags(err.to_string())
    }
}
