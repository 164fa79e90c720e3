//! Projection of a scanned directory into flat table rows
//!
//! The scanned directory itself becomes the first row, labelled `"."`,
//! followed by one row per direct child in scan order. Rows are rebuilt from
//! scratch for every scan and never mutated in place.

use crate::scan::{DirectoryNode, FileEntry};
use serde::Serialize;

/// Label of the row standing for the scanned directory
pub const CURRENT_DIRECTORY_LABEL: &str = ".";

/// One line of the explore table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Stable unique key: the entry's path
    pub id: String,
    /// Display label
    pub name: String,
    pub entry: FileEntry,
    pub is_current_directory: bool,
}

impl TableRow {
    /// Whether the row can be opened as a directory (the `"."` row cannot)
    #[must_use]
    pub const fn is_navigable(&self) -> bool {
        self.entry.is_directory && !self.is_current_directory
    }
}

/// Rows of one table instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableData {
    pub rows: Vec<TableRow>,
    /// Rows that stay on top regardless of sorting
    pub pinned_row_ids: Vec<String>,
}

impl TableData {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in table order
    pub fn row_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.id.as_str())
    }

    /// Look up a row by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Build rows with the default `"."` label for the current directory
#[must_use]
pub fn build_table_rows(directory: &DirectoryNode) -> TableData {
    build_table_rows_with_label(directory, CURRENT_DIRECTORY_LABEL)
}

/// Build rows with a custom label for the current directory row
#[must_use]
pub fn build_table_rows_with_label(directory: &DirectoryNode, label: &str) -> TableData {
    let current = TableRow {
        id: directory.info.id(),
        name: label.to_string(),
        entry: directory.info.clone(),
        is_current_directory: true,
    };

    let children = directory.children.iter().map(|child| TableRow {
        id: child.info.id(),
        name: child.name.clone(),
        entry: child.info.clone(),
        is_current_directory: false,
    });

    let pinned_row_ids = vec![current.id.clone()];
    let rows = std::iter::once(current).chain(children).collect();

    TableData {
        rows,
        pinned_row_ids,
    }
}
