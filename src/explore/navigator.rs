//! Scan target tracking and directory navigation
//!
//! Every request gets a fresh [`ScanRequestId`]. Only the result carrying the
//! most recently issued id is applied; anything older is reported as
//! [`ScanOutcome::Stale`] and dropped, so a slow scan of a directory the user
//! already left can never overwrite the listing of the one they are in.

use super::rows::{TableData, TableRow, build_table_rows};
use crate::scan::{DEFAULT_DEPTH, DirectoryNode, FileEntry, ScanError, collect_path_hierarchy, parent_from_hierarchy};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// What to scan; `path = None` is the process working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub path: Option<PathBuf>,
    pub depth: usize,
}

impl ScanTarget {
    #[must_use]
    pub const fn current(depth: usize) -> Self {
        Self { path: None, depth }
    }

    #[must_use]
    pub fn path(path: impl Into<PathBuf>, depth: usize) -> Self {
        Self {
            path: Some(path.into()),
            depth,
        }
    }
}

/// Monotonically increasing scan request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanRequestId(u64);

impl fmt::Display for ScanRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scan the caller should run and report back through `complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub id: ScanRequestId,
    pub target: ScanTarget,
}

/// Result of feeding a scan response to the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Applied,
    Failed(String),
    /// A newer request was issued; the response was discarded
    Stale,
}

#[derive(Debug)]
pub struct DirectoryNavigator {
    default_depth: usize,
    target: ScanTarget,
    next_id: u64,
    /// Latest issued request still waiting for its result
    pending: Option<ScanRequestId>,
    latest: Option<ScanRequestId>,
    tree: Option<DirectoryNode>,
    table: TableData,
    error: Option<String>,
}

impl Default for DirectoryNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl DirectoryNavigator {
    #[must_use]
    pub const fn new(default_depth: usize) -> Self {
        Self {
            default_depth,
            target: ScanTarget::current(default_depth),
            next_id: 0,
            pending: None,
            latest: None,
            tree: None,
            table: TableData {
                rows: Vec::new(),
                pinned_row_ids: Vec::new(),
            },
            error: None,
        }
    }

    /// Scan the working directory
    pub fn request_current(&mut self) -> ScanRequest {
        self.issue(ScanTarget::current(self.default_depth))
    }

    /// Scan `path`; `depth = None` uses the default depth
    pub fn request_path(&mut self, path: impl Into<PathBuf>, depth: Option<usize>) -> ScanRequest {
        let depth = depth.unwrap_or(self.default_depth);
        self.issue(ScanTarget::path(path, depth))
    }

    /// Repeat the last requested scan
    pub fn request_rescan(&mut self) -> ScanRequest {
        self.issue(self.target.clone())
    }

    /// Scan the parent of the directory shown, `None` at the filesystem root
    ///
    /// Falls back to the last requested path when no listing is shown, which
    /// lets the user climb out of a directory that failed to scan.
    pub fn request_parent(&mut self) -> Option<ScanRequest> {
        let hierarchy = match (&self.tree, &self.target.path) {
            (Some(tree), _) => tree.info.hierarchy.clone(),
            (None, Some(path)) => collect_path_hierarchy(path),
            (None, None) => return None,
        };

        let parent = parent_from_hierarchy(&hierarchy)?;
        Some(self.issue(ScanTarget::path(parent, self.target.depth)))
    }

    /// Open a child directory row
    ///
    /// Returns `None` for files and for the current-directory row.
    pub fn request_child(&mut self, row: &TableRow) -> Option<ScanRequest> {
        if !row.is_navigable() {
            return None;
        }
        Some(self.issue(ScanTarget::path(row.entry.path.clone(), self.target.depth)))
    }

    fn issue(&mut self, target: ScanTarget) -> ScanRequest {
        self.next_id += 1;
        let id = ScanRequestId(self.next_id);

        debug!(%id, path = ?target.path, depth = target.depth, "scan requested");
        self.target = target.clone();
        self.pending = Some(id);
        self.latest = Some(id);
        self.error = None;

        ScanRequest { id, target }
    }

    /// Feed a scan result back
    pub fn complete(&mut self, id: ScanRequestId, result: Result<DirectoryNode, ScanError>) -> ScanOutcome {
        if self.latest != Some(id) {
            debug!(%id, latest = ?self.latest, "discarding stale scan result");
            return ScanOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(tree) => {
                debug!(%id, root = %tree.info.path.display(), "scan applied");
                self.table = build_table_rows(&tree);
                self.tree = Some(tree);
                self.error = None;
                ScanOutcome::Applied
            }
            Err(err) => {
                let message = err.to_string();
                error!(%id, "scan failed: {message}");
                self.tree = None;
                self.table = TableData::default();
                self.error = Some(message.clone());
                ScanOutcome::Failed(message)
            }
        }
    }

    /// Record a tag assigned after the listing was built
    ///
    /// Tagged entries gain it as an own tag and their descendants as an
    /// inherited one, keeping the tags column current without a rescan.
    pub fn record_assigned_tag(&mut self, tag: &str, paths: &[PathBuf]) {
        for row in &mut self.table.rows {
            merge_assigned_tag(&mut row.entry, tag, paths);
        }
        if let Some(tree) = &mut self.tree {
            merge_into_tree(tree, tag, paths);
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&DirectoryNode> {
        self.tree.as_ref()
    }

    #[must_use]
    pub const fn table(&self) -> &TableData {
        &self.table
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn target(&self) -> &ScanTarget {
        &self.target
    }

    /// Directory of the listing shown
    #[must_use]
    pub fn current_dir(&self) -> Option<&Path> {
        self.tree.as_ref().map(|tree| tree.info.path.as_path())
    }
}

fn merge_into_tree(node: &mut DirectoryNode, tag: &str, paths: &[PathBuf]) {
    merge_assigned_tag(&mut node.info, tag, paths);
    for child in &mut node.children {
        merge_into_tree(child, tag, paths);
    }
}

fn merge_assigned_tag(entry: &mut FileEntry, tag: &str, paths: &[PathBuf]) {
    if paths.contains(&entry.path) {
        insert_sorted(&mut entry.own_tags, tag);
    }
    let inherited = paths
        .iter()
        .any(|path| entry.path != *path && entry.path.starts_with(path));
    if inherited {
        insert_sorted(&mut entry.inherited_tags, tag);
    }
}

fn insert_sorted(tags: &mut Vec<String>, tag: &str) {
    if let Err(index) = tags.binary_search_by(|existing| existing.as_str().cmp(tag)) {
        tags.insert(index, tag.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{node, sample_tree};

    #[test]
    fn test_initial_state() {
        let nav = DirectoryNavigator::new(3);
        assert!(!nav.is_loading());
        assert!(nav.tree().is_none());
        assert!(nav.table().is_empty());
        assert_eq!(nav.target(), &ScanTarget::current(3));
    }

    #[test]
    fn test_request_ids_increase() {
        let mut nav = DirectoryNavigator::default();
        let first = nav.request_current();
        let second = nav.request_path("/root", None);
        assert!(second.id > first.id);
        assert_eq!(second.target, ScanTarget::path("/root", DEFAULT_DEPTH));
        assert!(nav.is_loading());
    }

    #[test]
    fn test_complete_applies_latest() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/root", None);

        let outcome = nav.complete(request.id, Ok(sample_tree()));
        assert_eq!(outcome, ScanOutcome::Applied);
        assert!(!nav.is_loading());
        assert_eq!(nav.current_dir(), Some(Path::new("/root")));
        assert_eq!(nav.table().len(), 3);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut nav = DirectoryNavigator::default();
        let slow = nav.request_path("/root", None);
        let fast = nav.request_path("/root/dir", None);

        let dir = node("/root/dir", true, vec![]);
        assert_eq!(nav.complete(fast.id, Ok(dir)), ScanOutcome::Applied);
        assert_eq!(nav.complete(slow.id, Ok(sample_tree())), ScanOutcome::Stale);

        assert_eq!(nav.current_dir(), Some(Path::new("/root/dir")));
        assert_eq!(nav.table().len(), 1);
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut nav = DirectoryNavigator::default();
        let slow = nav.request_path("/root", None);
        let _fast = nav.request_path("/root/dir", None);

        assert_eq!(nav.complete(slow.id, Ok(sample_tree())), ScanOutcome::Stale);
        assert!(nav.is_loading());
        assert!(nav.tree().is_none());
    }

    #[test]
    fn test_failure_clears_listing() {
        let mut nav = DirectoryNavigator::default();
        let ok = nav.request_path("/root", None);
        nav.complete(ok.id, Ok(sample_tree()));

        let bad = nav.request_path("/missing", None);
        let outcome = nav.complete(bad.id, Err(ScanError::NotADirectory("/missing".into())));

        assert!(matches!(outcome, ScanOutcome::Failed(_)));
        assert!(nav.tree().is_none());
        assert!(nav.table().is_empty());
        assert!(nav.error().is_some_and(|e| e.contains("/missing")));
    }

    #[test]
    fn test_rescan_repeats_failed_target() {
        let mut nav = DirectoryNavigator::default();
        let bad = nav.request_path("/missing", Some(4));
        nav.complete(bad.id, Err(ScanError::Io("boom".into())));

        let retry = nav.request_rescan();
        assert_eq!(retry.target, ScanTarget::path("/missing", 4));
        assert!(nav.error().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_request_parent_uses_hierarchy() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/root/dir", None);
        nav.complete(request.id, Ok(node("/root/dir", true, vec![])));

        let parent = nav.request_parent().unwrap();
        assert_eq!(parent.target.path, Some(PathBuf::from("/root")));
    }

    #[cfg(unix)]
    #[test]
    fn test_request_parent_at_root() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/", None);
        nav.complete(request.id, Ok(node("/", true, vec![])));

        assert!(nav.request_parent().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_request_parent_after_failure() {
        let mut nav = DirectoryNavigator::default();
        let bad = nav.request_path("/root/missing", None);
        nav.complete(bad.id, Err(ScanError::Io("gone".into())));

        let parent = nav.request_parent().unwrap();
        assert_eq!(parent.target.path, Some(PathBuf::from("/root")));
    }

    #[test]
    fn test_request_child_only_for_directories() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/root", Some(5));
        nav.complete(request.id, Ok(sample_tree()));

        let rows = nav.table().rows.clone();
        assert!(nav.request_child(&rows[0]).is_none());
        assert!(nav.request_child(&rows[2]).is_none());

        let child = nav.request_child(&rows[1]).unwrap();
        assert_eq!(child.target, ScanTarget::path("/root/dir", 5));
    }

    #[test]
    fn test_record_assigned_tag() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/root", None);
        nav.complete(request.id, Ok(sample_tree()));

        let paths = vec![PathBuf::from("/root/dir")];
        nav.record_assigned_tag("work", &paths);
        nav.record_assigned_tag("work", &paths);

        let row = nav.table().get("/root/dir").unwrap();
        assert_eq!(row.entry.own_tags, vec!["work".to_string()]);
        assert!(nav.table().get("/root").unwrap().entry.own_tags.is_empty());
    }

    #[test]
    fn test_record_assigned_tag_reaches_descendants() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/root", None);
        nav.complete(request.id, Ok(sample_tree()));

        nav.record_assigned_tag("project", &[PathBuf::from("/root")]);
        nav.record_assigned_tag("archive", &[PathBuf::from("/root")]);

        let root = nav.table().get("/root").unwrap();
        assert_eq!(root.entry.own_tags, vec!["archive", "project"]);
        assert!(root.entry.inherited_tags.is_empty());

        let file = nav.table().get("/root/example.txt").unwrap();
        assert!(file.entry.own_tags.is_empty());
        assert_eq!(file.entry.inherited_tags, vec!["archive", "project"]);

        let tree = nav.tree().unwrap();
        assert_eq!(tree.info.own_tags, vec!["archive", "project"]);
        assert!(
            tree.children
                .iter()
                .all(|child| child.info.inherited_tags == vec!["archive", "project"])
        );
    }

    #[test]
    fn test_record_assigned_tag_ignores_sibling_prefix() {
        let mut nav = DirectoryNavigator::default();
        let request = nav.request_path("/root", None);
        nav.complete(request.id, Ok(sample_tree()));

        nav.record_assigned_tag("work", &[PathBuf::from("/root/di")]);

        let dir = nav.table().get("/root/dir").unwrap();
        assert!(dir.entry.own_tags.is_empty());
        assert!(dir.entry.inherited_tags.is_empty());
    }
}
