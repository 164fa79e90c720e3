//! Scan result types

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Filesystem entry metadata produced by a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Absolute path, unique within a scan
    pub path: PathBuf,
    pub is_directory: bool,
    pub is_symlink: bool,
    /// Size in bytes (meaningless for directories)
    pub size: u64,
    /// Path segments from the filesystem root down to this entry
    pub hierarchy: Vec<String>,
    pub modified: Option<DateTime<Utc>>,
    /// Tags assigned directly to this entry
    pub own_tags: Vec<String>,
    /// Tags carried by ancestor directories
    pub inherited_tags: Vec<String>,
}

impl FileEntry {
    /// Lossless-enough string key used as the table row id
    #[must_use]
    pub fn id(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One node of the scanned directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryNode {
    /// File name, or the whole path for filesystem roots
    pub name: String,
    pub info: FileEntry,
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Number of nodes in this subtree, including itself
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// A node always contains at least itself
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
