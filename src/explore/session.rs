//! Explore session: one owned object for every explorer transition
//!
//! The terminal front end only talks to [`ExploreSession`]. It forwards
//! scan requests and results to the [`DirectoryNavigator`], selection and
//! panel actions to the [`SelectionSync`] engine, and keeps a sorted view
//! of the rows for rendering.

use super::navigator::{DirectoryNavigator, ScanOutcome, ScanRequest, ScanRequestId};
use super::path_display::format_path_for_display;
use super::rows::TableRow;
use super::sort::{SortState, sort_rows};
use crate::scan::{DirectoryNode, ScanError};
use crate::selection::{PanelState, SelectionSync, TaggingItem};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ExploreSession {
    navigator: DirectoryNavigator,
    selection: SelectionSync,
    sort: SortState,
    /// Rows of the current listing in display order
    rows: Vec<TableRow>,
}

impl ExploreSession {
    #[must_use]
    pub fn new(default_depth: usize) -> Self {
        Self {
            navigator: DirectoryNavigator::new(default_depth),
            ..Self::default()
        }
    }

    pub fn request_current(&mut self) -> ScanRequest {
        let request = self.navigator.request_current();
        self.leave_directory();
        request
    }

    pub fn request_path(&mut self, path: impl Into<PathBuf>, depth: Option<usize>) -> ScanRequest {
        let request = self.navigator.request_path(path, depth);
        self.leave_directory();
        request
    }

    pub fn request_rescan(&mut self) -> ScanRequest {
        let request = self.navigator.request_rescan();
        self.leave_directory();
        request
    }

    pub fn request_parent(&mut self) -> Option<ScanRequest> {
        let request = self.navigator.request_parent()?;
        self.leave_directory();
        Some(request)
    }

    /// Open the row with `id` if it is a child directory
    pub fn request_child(&mut self, id: &str) -> Option<ScanRequest> {
        let row = self.rows.iter().find(|row| row.id == id)?.clone();
        let request = self.navigator.request_child(&row)?;
        self.leave_directory();
        Some(request)
    }

    /// Selection is dropped as soon as a new listing is requested
    fn leave_directory(&mut self) {
        self.selection.on_directory_changed(None, Vec::<String>::new());
    }

    /// Apply a scan result
    pub fn complete(&mut self, id: ScanRequestId, result: Result<DirectoryNode, ScanError>) -> ScanOutcome {
        let outcome = self.navigator.complete(id, result);

        match outcome {
            ScanOutcome::Applied => {
                self.refresh_rows();
                let anchor = self.navigator.current_dir().map(Path::to_path_buf);
                let ids: Vec<String> = self.rows.iter().map(|row| row.id.clone()).collect();
                self.selection.on_directory_changed(anchor, ids);
            }
            ScanOutcome::Failed(_) => {
                self.rows.clear();
                self.selection.on_directory_changed(None, Vec::<String>::new());
            }
            ScanOutcome::Stale => {}
        }

        outcome
    }

    fn refresh_rows(&mut self) {
        let table = self.navigator.table();
        self.rows.clone_from(&table.rows);
        sort_rows(&mut self.rows, &self.sort, &table.pinned_row_ids);
    }

    /// Replace the table selection with the rows whose ids are given
    pub fn set_selection<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let wanted: BTreeSet<&str> = ids.into_iter().collect();
        let selected: Vec<TableRow> = self
            .rows
            .iter()
            .filter(|row| wanted.contains(row.id.as_str()))
            .cloned()
            .collect();
        self.selection.on_selection_changed(&selected);
    }

    /// Flip the selection of one row
    pub fn toggle_row(&mut self, id: &str) {
        let mut ids: BTreeSet<String> = self.selection.selected_ids().map(str::to_string).collect();
        if !ids.remove(id) {
            ids.insert(id.to_string());
        }
        self.set_selection(ids.iter().map(String::as_str));
    }

    /// Select every row, or clear the selection if all are already selected
    pub fn toggle_all(&mut self) {
        if self.selection.is_all_rows_selected() {
            self.set_selection(std::iter::empty());
        } else {
            let ids: Vec<String> = self.rows.iter().map(|row| row.id.clone()).collect();
            self.set_selection(ids.iter().map(String::as_str));
        }
    }

    pub fn remove_item(&mut self, path: &Path) {
        self.selection.on_item_removed(path);
    }

    pub fn toggle_aggregate_mode(&mut self) -> bool {
        self.selection.toggle_aggregate_mode()
    }

    pub const fn close_panel(&mut self) {
        self.selection.close_panel();
    }

    pub const fn open_panel(&mut self) {
        self.selection.open_panel();
    }

    /// Advance to the next sort order and re-sort the rows
    pub fn cycle_sort(&mut self) -> SortState {
        self.sort = self.sort.cycle();
        self.refresh_rows();
        self.sort
    }

    /// Show a freshly assigned tag in the listing
    pub fn record_assigned_tag(&mut self, tag: &str, paths: &[PathBuf]) {
        self.navigator.record_assigned_tag(tag, paths);
        self.refresh_rows();
    }

    /// Current directory shortened to `max_length` characters
    #[must_use]
    pub fn header_label(&self, max_length: usize) -> String {
        let path = self
            .navigator
            .current_dir()
            .or(self.navigator.target().path.as_deref());

        match path {
            Some(path) => format_path_for_display(&path.to_string_lossy(), max_length),
            None => String::new(),
        }
    }

    /// Paths the tagging panel would tag
    #[must_use]
    pub fn tag_targets(&self) -> Vec<PathBuf> {
        self.selection
            .panel_items()
            .into_iter()
            .map(|item| item.absolute_path)
            .collect()
    }

    #[must_use]
    pub fn panel_items(&self) -> Vec<TaggingItem> {
        self.selection.panel_items()
    }

    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        self.selection.panel_state()
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    #[must_use]
    pub const fn sort(&self) -> SortState {
        self.sort
    }

    #[must_use]
    pub const fn navigator(&self) -> &DirectoryNavigator {
        &self.navigator
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionSync {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::sort::{SortColumn, SortDirection};
    use crate::testing::{node, sample_tree};

    fn loaded() -> ExploreSession {
        let mut session = ExploreSession::new(2);
        let request = session.request_path("/root", None);
        session.complete(request.id, Ok(sample_tree()));
        session
    }

    #[test]
    fn test_completion_populates_rows() {
        let session = loaded();
        assert_eq!(session.rows().len(), 3);
        assert_eq!(session.panel_state(), PanelState::Closed);
        assert_eq!(session.selection().anchor(), Some(Path::new("/root")));
    }

    #[test]
    fn test_toggle_row_opens_and_closes_panel() {
        let mut session = loaded();

        session.toggle_row("/root/dir");
        assert!(session.is_selected("/root/dir"));
        assert_eq!(session.panel_state(), PanelState::OpenIndividual);

        session.toggle_row("/root/dir");
        assert_eq!(session.panel_state(), PanelState::Closed);
    }

    #[test]
    fn test_toggle_all_then_aggregate() {
        let mut session = loaded();

        session.toggle_all();
        assert!(session.toggle_aggregate_mode());
        assert_eq!(session.panel_state(), PanelState::OpenAggregate);
        assert_eq!(session.tag_targets(), vec![PathBuf::from("/root")]);

        session.toggle_all();
        assert_eq!(session.panel_state(), PanelState::Closed);
    }

    #[test]
    fn test_new_request_resets_selection() {
        let mut session = loaded();
        session.toggle_all();
        session.toggle_aggregate_mode();

        let request = session.request_child("/root/dir").unwrap();
        assert_eq!(session.panel_state(), PanelState::Closed);
        assert!(!session.selection().is_aggregate());

        session.complete(request.id, Ok(node("/root/dir", true, vec![])));
        assert_eq!(session.rows().len(), 1);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_stale_completion_leaves_session_alone() {
        let mut session = ExploreSession::new(2);
        let slow = session.request_path("/root", None);
        let fast = session.request_path("/root/dir", None);

        session.complete(fast.id, Ok(node("/root/dir", true, vec![])));
        session.toggle_row("/root/dir");

        assert_eq!(session.complete(slow.id, Ok(sample_tree())), ScanOutcome::Stale);
        assert_eq!(session.rows().len(), 1);
        assert!(session.is_selected("/root/dir"));
    }

    #[test]
    fn test_failed_scan_empties_table() {
        let mut session = loaded();
        session.toggle_row("/root/dir");

        let request = session.request_path("/missing", None);
        let outcome = session.complete(request.id, Err(ScanError::Io("denied".into())));

        assert!(matches!(outcome, ScanOutcome::Failed(_)));
        assert!(session.rows().is_empty());
        assert_eq!(session.panel_state(), PanelState::Closed);
        assert!(!session.toggle_aggregate_mode());
    }

    #[test]
    fn test_selection_ignored_while_loading() {
        let mut session = loaded();
        let _pending = session.request_rescan();

        session.toggle_row("/root/dir");
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_cycle_sort_keeps_current_directory_first() {
        let mut session = loaded();

        let sort = session.cycle_sort();
        assert_eq!(sort, SortState::by(SortColumn::Name, SortDirection::Ascending));
        let sort = session.cycle_sort();
        assert_eq!(sort, SortState::by(SortColumn::Name, SortDirection::Descending));

        let names: Vec<_> = session.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec![".", "example.txt", "dir"]);
    }

    #[test]
    fn test_header_label() {
        let session = loaded();
        assert_eq!(session.header_label(50), "/root");
        assert_eq!(ExploreSession::new(2).header_label(50), "");
    }

    #[test]
    fn test_remove_item_and_close_panel() {
        let mut session = loaded();
        session.toggle_row("/root/dir");
        session.toggle_row("/root/example.txt");

        session.remove_item(Path::new("/root/dir"));
        assert_eq!(session.tag_targets(), vec![PathBuf::from("/root/example.txt")]);

        session.close_panel();
        assert_eq!(session.panel_state(), PanelState::Closed);
        session.open_panel();
        assert_eq!(session.panel_state(), PanelState::OpenIndividual);
    }

    #[test]
    fn test_record_assigned_tag_keeps_selection() {
        let mut session = loaded();
        session.toggle_row("/root/example.txt");

        let targets = session.tag_targets();
        session.record_assigned_tag("draft", &targets);
        let row = session.rows().iter().find(|r| r.id == "/root/example.txt").unwrap();
        assert_eq!(row.entry.own_tags, vec!["draft".to_string()]);
        assert!(session.is_selected("/root/example.txt"));
    }

    #[test]
    fn test_group_tag_shows_as_inherited_on_child_rows() {
        let mut session = loaded();
        session.toggle_all();
        assert!(session.toggle_aggregate_mode());

        let targets = session.tag_targets();
        assert_eq!(targets, vec![PathBuf::from("/root")]);
        session.record_assigned_tag("archive", &targets);

        for row in session.rows() {
            if row.is_current_directory {
                assert_eq!(row.entry.own_tags, vec!["archive"]);
                assert!(row.entry.inherited_tags.is_empty());
            } else {
                assert!(row.entry.own_tags.is_empty(), "{}", row.id);
                assert_eq!(row.entry.inherited_tags, vec!["archive"], "{}", row.id);
            }
        }

        session.cycle_sort();
        let file = session.rows().iter().find(|r| r.id == "/root/example.txt").unwrap();
        assert_eq!(file.entry.inherited_tags, vec!["archive"]);
        assert_eq!(session.panel_state(), PanelState::OpenAggregate);
    }
}
