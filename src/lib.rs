//! tag-crucible - a terminal file explorer for attaching tags
//!
//! Scans a directory into a sortable table, keeps the tagging panel in sync
//! with the table selection, and stores tags in an embedded database where
//! every entry also sees the tags of its ancestors.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod explore;
pub mod logging;
pub mod output;
pub mod picker;
pub mod scan;
pub mod selection;
pub mod tagging;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CrucibleError {
    /// Database error
    #[error("Database error: {0}")]
    Db(#[from] db::DbError),
    /// Directory scan error
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
    /// Tag assignment error
    #[error("Tagging error: {0}")]
    Tagging(#[from] tagging::TaggingError),
    /// Directory picker error
    #[error("Picker error: {0}")]
    Picker(#[from] picker::PickerError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
