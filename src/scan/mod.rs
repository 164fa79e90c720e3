//! Directory scanning
//!
//! Walks a directory to a bounded depth and builds a [`DirectoryNode`] tree
//! whose root is the scanned directory. Entries the process may not read are
//! skipped with a warning; any other IO failure aborts the scan.
//!
//! The explorer only needs the first level of children, but deeper levels
//! are kept in the tree so drill-down previews and the `scan` command can
//! show them.

pub mod error;
pub mod hierarchy;
pub mod types;

pub use error::ScanError;
pub use hierarchy::{collect_path_hierarchy, parent_from_hierarchy};
pub use types::{DirectoryNode, FileEntry};

use crate::db::TagLookup;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::env;
use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

/// Depth used when none is configured: the directory and its grandchildren
pub const DEFAULT_DEPTH: usize = 2;

/// Source of directory trees
///
/// `path = None` scans the process working directory.
pub trait DirectoryScanner: Send + Sync {
    /// Scan `path` down to `depth` levels below it
    ///
    /// # Errors
    ///
    /// Returns `ScanError` if the root cannot be read or the walk fails.
    fn scan(&self, path: Option<&Path>, depth: usize) -> Result<DirectoryNode, ScanError>;
}

/// Scanner backed by the local filesystem
#[derive(Clone, Default)]
pub struct FsScanner {
    tags: Option<Arc<dyn TagLookup>>,
}

impl FsScanner {
    /// Scanner that leaves tag fields empty
    #[must_use]
    pub fn new() -> Self {
        Self { tags: None }
    }

    /// Annotate entries with own and inherited tags from `tags`
    #[must_use]
    pub fn with_tags(mut self, tags: Arc<dyn TagLookup>) -> Self {
        self.tags = Some(tags);
        self
    }

    fn collect_entries(&self, root: &Path, depth: usize) -> Result<Vec<FileEntry>, ScanError> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root).max_depth(depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err
                        .io_error()
                        .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied)
                    {
                        warn!(path = ?err.path(), "skipping entry: permission denied");
                        continue;
                    }
                    return Err(ScanError::Io(err.to_string()));
                }
            };

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    if err
                        .io_error()
                        .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied)
                    {
                        warn!(path = ?entry.path(), "skipping entry: permission denied");
                        continue;
                    }
                    return Err(ScanError::Io(err.to_string()));
                }
            };

            entries.push(self.to_file_entry(&entry, &metadata)?);
        }

        Ok(entries)
    }

    fn to_file_entry(&self, entry: &DirEntry, metadata: &Metadata) -> Result<FileEntry, ScanError> {
        let path = entry.path();
        let (own_tags, inherited_tags) = match &self.tags {
            Some(lookup) => (lookup.own_tags(path)?, lookup.inherited_tags(path)?),
            None => (Vec::new(), Vec::new()),
        };

        Ok(FileEntry {
            path: path.to_path_buf(),
            is_directory: metadata.is_dir(),
            is_symlink: entry.path_is_symlink(),
            size: metadata.len(),
            hierarchy: collect_path_hierarchy(path),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            own_tags,
            inherited_tags,
        })
    }
}

impl DirectoryScanner for FsScanner {
    fn scan(&self, path: Option<&Path>, depth: usize) -> Result<DirectoryNode, ScanError> {
        let root = match path {
            Some(path) => absolute(path)?,
            None => env::current_dir().map_err(|e| {
                error!("failed to get current directory: {e}");
                ScanError::CurrentDir(e.to_string())
            })?,
        };

        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        debug!(root = %root.display(), depth, "scanning directory");
        let entries = self.collect_entries(&root, depth).inspect_err(|e| {
            error!(root = %root.display(), "failed to scan directory: {e}");
        })?;
        build_directory_tree(&root, entries)
    }
}

/// Make a scan root absolute without resolving symlinks
fn absolute(path: &Path) -> Result<PathBuf, ScanError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::path::absolute(path).map_err(|e| ScanError::Io(e.to_string()))
}

/// Assemble walk results into a tree rooted at `root`
///
/// # Errors
///
/// Returns `ScanError::MissingRoot` if `root` is not among `entries`.
pub fn build_directory_tree(root: &Path, entries: Vec<FileEntry>) -> Result<DirectoryNode, ScanError> {
    let root_index = entries
        .iter()
        .position(|entry| entry.path == root)
        .ok_or_else(|| ScanError::MissingRoot(root.to_path_buf()))?;

    let mut adjacency: HashMap<PathBuf, Vec<usize>> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if index == root_index {
            continue;
        }
        if let Some(parent) = entry.path.parent() {
            adjacency.entry(parent.to_path_buf()).or_default().push(index);
        }
    }

    Ok(build_node(&entries, &adjacency, root_index))
}

fn build_node(
    entries: &[FileEntry],
    adjacency: &HashMap<PathBuf, Vec<usize>>,
    index: usize,
) -> DirectoryNode {
    let info = entries[index].clone();
    let name = info.path.file_name().map_or_else(
        || info.path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    );

    let mut children: Vec<DirectoryNode> = adjacency
        .get(&info.path)
        .into_iter()
        .flatten()
        .map(|&child| build_node(entries, adjacency, child))
        .collect();
    children.sort_by(compare_nodes);

    DirectoryNode {
        name,
        info,
        children,
    }
}

/// Directories first, then by name
fn compare_nodes(a: &DirectoryNode, b: &DirectoryNode) -> Ordering {
    match (a.info.is_directory, b.info.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, entry};
    use std::fs;

    #[test]
    fn test_build_tree_simple() {
        let root = PathBuf::from("/root");
        let entries = vec![
            entry("/root", true),
            entry("/root/file2.txt", false),
            entry("/root/file1.txt", false),
        ];

        let tree = build_directory_tree(&root, entries).unwrap();
        assert_eq!(tree.info.path, root);
        assert_eq!(tree.name, "root");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].info.path, PathBuf::from("/root/file1.txt"));
        assert_eq!(tree.children[1].info.path, PathBuf::from("/root/file2.txt"));
    }

    #[test]
    fn test_build_tree_root_only() {
        let tree = build_directory_tree(Path::new("/root"), vec![entry("/root", true)]).unwrap();
        assert!(tree.children.is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_build_tree_directories_first() {
        let entries = vec![
            entry("/root", true),
            entry("/root/a.txt", false),
            entry("/root/zdir", true),
            entry("/root/zdir/inner.txt", false),
        ];

        let tree = build_directory_tree(Path::new("/root"), entries).unwrap();
        let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zdir", "a.txt"]);
        assert_eq!(tree.children[0].children.len(), 1);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_build_tree_missing_root() {
        let result = build_directory_tree(Path::new("/root"), vec![entry("/other", true)]);
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }

    #[test]
    fn test_scan_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/deep.txt"), b"deep").unwrap();
        fs::write(dir.path().join("file.txt"), b"hello").unwrap();

        let tree = FsScanner::new().scan(Some(dir.path()), 2).unwrap();
        assert_eq!(tree.info.path, dir.path());
        assert!(tree.info.is_directory);
        assert_eq!(tree.children.len(), 2);

        let sub = &tree.children[0];
        assert_eq!(sub.name, "sub");
        assert_eq!(sub.children.len(), 1);

        let file = &tree.children[1];
        assert_eq!(file.name, "file.txt");
        assert_eq!(file.info.size, 5);
        assert!(file.info.modified.is_some());
        assert_eq!(file.info.hierarchy.last().map(String::as_str), Some("file.txt"));
    }

    #[test]
    fn test_scan_respects_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/deep.txt"), b"deep").unwrap();

        let tree = FsScanner::new().scan(Some(dir.path()), 1).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].children.is_empty());
    }

    #[test]
    fn test_scan_rejects_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();

        let result = FsScanner::new().scan(Some(&file), 1);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_scan_annotates_tags() {
        let test_db = TestDb::new();
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("file.txt"), b"x").unwrap();

        test_db.db().assign_tag_to_paths(&[root.clone()], "project").unwrap();
        test_db
            .db()
            .assign_tag_to_paths(&[root.join("file.txt")], "draft")
            .unwrap();

        let scanner = FsScanner::new().with_tags(Arc::new(test_db.db().clone()));
        let tree = scanner.scan(Some(&root), 1).unwrap();

        assert_eq!(tree.info.own_tags, vec!["project".to_string()]);
        let file = &tree.children[0];
        assert_eq!(file.info.own_tags, vec!["draft".to_string()]);
        assert_eq!(file.info.inherited_tags, vec!["project".to_string()]);
    }
}
