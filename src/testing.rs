//! Testing utilities for tag-crucible
//!
//! Provides a `TestDb` wrapper around a throwaway tag store and fixture
//! builders for scan results.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::Database;
use crate::scan::{DirectoryNode, FileEntry, collect_path_hierarchy};
use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary tag store that is removed when dropped
pub struct TestDb {
    // Field order matters: the database must close before its directory goes
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Open an empty database in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("tags.db")).expect("Failed to open test database");
        Self { db, dir }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// A scanned entry with no tags and a zero size
#[must_use]
pub fn entry(path: &str, is_directory: bool) -> FileEntry {
    let path = PathBuf::from(path);
    FileEntry {
        hierarchy: collect_path_hierarchy(&path),
        path,
        is_directory,
        is_symlink: false,
        size: 0,
        modified: None,
        own_tags: Vec::new(),
        inherited_tags: Vec::new(),
    }
}

/// A tree node named after the last path segment
#[must_use]
pub fn node(path: &str, is_directory: bool, children: Vec<DirectoryNode>) -> DirectoryNode {
    let info = entry(path, is_directory);
    let name = info.path.file_name().map_or_else(
        || path.to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    DirectoryNode { name, info, children }
}

/// `/root` holding a directory `dir` and a file `example.txt`
#[must_use]
pub fn sample_tree() -> DirectoryNode {
    let mut dir = node("/root/dir", true, vec![]);
    dir.info.modified = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single();

    let mut file = node("/root/example.txt", false, vec![]);
    file.info.size = 2048;
    file.info.modified = Utc.with_ymd_and_hms(2023, 6, 7, 8, 9, 10).single();

    let mut root = node("/root", true, vec![dir, file]);
    root.info.modified = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).single();
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_starts_empty() {
        let test_db = TestDb::new();
        assert_eq!(test_db.db().count(), 0);
        assert!(test_db.path().exists());
    }

    #[test]
    fn test_db_cleanup() {
        let path = {
            let test_db = TestDb::new();
            test_db.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_sample_tree_shape() {
        let tree = sample_tree();
        assert_eq!(tree.name, "root");
        assert_eq!(tree.children.len(), 2);
        assert!(tree.children[0].info.is_directory);
        assert_eq!(tree.children[1].info.size, 2048);
    }
}
