//! Selection synchronization between the explore table and the tagging panel
//!
//! [`SelectionSync`] owns everything the tagging panel derives from table
//! selection: which items are listed, whether the panel is shown, and
//! whether the whole directory is being tagged as one unit ("aggregate" or
//! group mode).
//!
//! # State machine
//!
//! ```text
//!            select ≥1 row                 toggle (all rows selected)
//!   Closed ───────────────▶ OpenIndividual ──────────────────────────▶ OpenAggregate
//!     ▲      selection empty      │  ▲        toggle / partial selection      │
//!     └───────────────────────────┘  └───────────────────────────────────────┘
//!
//!   any state ──(close_panel | directory changed)──▶ Closed
//! ```
//!
//! # Invariants
//!
//! After every operation:
//! - aggregate mode implies the selected keys equal the visible row ids
//! - the panel is visible iff it was not dismissed and the selection is
//!   non-empty or aggregate mode is on
//! - every selected key is a visible row id; selections never survive a
//!   directory change

use crate::explore::rows::TableRow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lightweight panel entry for one tagging target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggingItem {
    pub absolute_path: PathBuf,
    pub display_name: String,
}

impl TaggingItem {
    #[must_use]
    pub fn new(absolute_path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<&TableRow> for TaggingItem {
    fn from(row: &TableRow) -> Self {
        Self::new(row.entry.path.clone(), row.name.clone())
    }
}

/// Observable panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    OpenIndividual,
    OpenAggregate,
}

/// Selection-sync engine
#[derive(Debug, Clone, Default)]
pub struct SelectionSync {
    /// row id -> panel item
    selected: BTreeMap<String, TaggingItem>,
    aggregate: bool,
    /// Set by `close_panel`, cleared when the user selects again
    dismissed: bool,
    /// Row ids of the table currently shown
    visible_rows: BTreeSet<String>,
    /// Directory tagged as a whole in aggregate mode
    anchor: Option<PathBuf>,
}

impl SelectionSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with the table's complete current selection
    ///
    /// `selected_rows` is the full set, not a delta. Visible rows missing
    /// from it are deselected; rows the table does not know are ignored.
    pub fn on_selection_changed(&mut self, selected_rows: &[TableRow]) {
        let chosen: BTreeSet<&str> = selected_rows.iter().map(|row| row.id.as_str()).collect();

        self.selected
            .retain(|id, _| self.visible_rows.contains(id) && chosen.contains(id.as_str()));

        for row in selected_rows {
            if !self.visible_rows.contains(&row.id) {
                debug!(id = %row.id, "ignoring selection of a row outside the current table");
                continue;
            }
            self.selected.insert(row.id.clone(), TaggingItem::from(row));
        }

        if self.selected.is_empty() {
            self.aggregate = false;
        } else {
            self.dismissed = false;
        }

        if !self.is_all_rows_selected() {
            self.aggregate = false;
        }

        debug!(
            selected = self.selected.len(),
            aggregate = self.aggregate,
            "selection changed"
        );
    }

    /// Remove one item from the panel
    ///
    /// Removing the aggregate anchor cancels aggregate mode and clears the
    /// whole selection.
    pub fn on_item_removed(&mut self, path: &Path) {
        if self.aggregate && self.anchor.as_deref() == Some(path) {
            self.selected.clear();
            self.aggregate = false;
            debug!(anchor = %path.display(), "aggregate item removed");
            return;
        }

        let key = path.to_string_lossy();
        if self.selected.remove(key.as_ref()).is_none() {
            return;
        }

        if self.aggregate && !self.is_all_rows_selected() {
            self.aggregate = false;
        }
        if self.selected.is_empty() {
            self.aggregate = false;
        }
    }

    /// A new directory listing replaced the table
    ///
    /// `anchor` is the scanned directory's own path, `None` when the scan
    /// failed and the table is empty.
    pub fn on_directory_changed<I, S>(&mut self, anchor: Option<PathBuf>, row_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        self.aggregate = false;
        self.dismissed = false;
        self.visible_rows = row_ids.into_iter().map(Into::into).collect();
        self.anchor = anchor;
        debug!(rows = self.visible_rows.len(), "directory changed, selection reset");
    }

    /// Flip aggregate mode; only allowed while every row is selected
    ///
    /// # Returns
    /// `true` if the mode changed
    pub fn toggle_aggregate_mode(&mut self) -> bool {
        if !self.is_all_rows_selected() || self.anchor.is_none() {
            return false;
        }
        self.aggregate = !self.aggregate;
        true
    }

    /// Hide the panel and forget aggregate mode, keeping the row selection
    pub const fn close_panel(&mut self) {
        self.dismissed = true;
        self.aggregate = false;
    }

    /// Show the panel again after `close_panel`
    pub const fn open_panel(&mut self) {
        self.dismissed = false;
    }

    /// Whether the selection covers every visible row (never for an empty table)
    #[must_use]
    pub fn is_all_rows_selected(&self) -> bool {
        !self.visible_rows.is_empty()
            && self
                .visible_rows
                .iter()
                .all(|id| self.selected.contains_key(id))
    }

    #[must_use]
    pub fn is_panel_visible(&self) -> bool {
        !self.dismissed && (!self.selected.is_empty() || self.aggregate)
    }

    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        self.aggregate
    }

    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        if !self.is_panel_visible() {
            PanelState::Closed
        } else if self.aggregate {
            PanelState::OpenAggregate
        } else {
            PanelState::OpenIndividual
        }
    }

    /// Items the panel lists and tags
    ///
    /// In aggregate mode this is a single item standing for the whole
    /// directory, labelled with its full path.
    #[must_use]
    pub fn panel_items(&self) -> Vec<TaggingItem> {
        match (&self.anchor, self.aggregate) {
            (Some(anchor), true) => {
                vec![TaggingItem::new(anchor.clone(), anchor.to_string_lossy())]
            }
            _ => self.selected.values().cloned().collect(),
        }
    }

    /// Whether the row with `id` is selected
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains_key(id)
    }

    /// Selected row ids, sorted
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn anchor(&self) -> Option<&Path> {
        self.anchor.as_deref()
    }
}
