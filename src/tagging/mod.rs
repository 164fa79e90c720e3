//! Tag assignment from the tagging panel
//!
//! [`TagAssigner`] is the seam to whatever persists tags. [`TaggingPanel`]
//! holds the panel's own input state (the tag being typed and the cursor
//! over the listed items) and validates a submission before handing it to
//! the assigner.

pub mod error;

pub use error::TaggingError;

use crate::db::Database;
use crate::selection::TaggingItem;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Persists one tag on a set of paths
pub trait TagAssigner {
    /// Attach `tag` to every path in `paths`
    ///
    /// # Errors
    ///
    /// Returns `TaggingError` if the tag could not be stored.
    fn assign_tag(&self, paths: &[PathBuf], tag: &str) -> Result<(), TaggingError>;
}

impl TagAssigner for Database {
    fn assign_tag(&self, paths: &[PathBuf], tag: &str) -> Result<(), TaggingError> {
        self.assign_tag_to_paths(paths, tag)?;
        self.flush()?;
        Ok(())
    }
}

/// Result of pressing "add tag"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored on `count` paths
    Assigned { tag: String, count: usize },
    /// Input was empty or whitespace
    EmptyTag,
    /// The panel lists nothing to tag
    NoItems,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct TaggingPanel {
    input: String,
    cursor: usize,
}

impl TaggingPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Validate the input and assign it to `items`
    ///
    /// The input is cleared only when the assignment succeeds, so a failed
    /// attempt can be retried as is.
    pub fn submit<A>(&mut self, assigner: &A, items: &[TaggingItem]) -> SubmitOutcome
    where
        A: TagAssigner + ?Sized,
    {
        let tag = self.input.trim();

        if tag.is_empty() {
            warn!("tag name is empty");
            return SubmitOutcome::EmptyTag;
        }
        if items.is_empty() {
            warn!("no items selected");
            return SubmitOutcome::NoItems;
        }

        let paths: Vec<PathBuf> = items.iter().map(|item| item.absolute_path.clone()).collect();

        match assigner.assign_tag(&paths, tag) {
            Ok(()) => {
                info!(tag, count = paths.len(), "tag assigned");
                let tag = tag.to_string();
                self.input.clear();
                SubmitOutcome::Assigned {
                    tag,
                    count: paths.len(),
                }
            }
            Err(err) => {
                error!(tag, "failed to assign tag: {err}");
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }

    /// Highlighted item index
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, item_count: usize) {
        if self.cursor + 1 < item_count {
            self.cursor += 1;
        }
    }

    /// Keep the cursor inside a list that may have shrunk
    pub fn clamp_cursor(&mut self, item_count: usize) {
        self.cursor = self.cursor.min(item_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingAssigner {
        calls: RefCell<Vec<(Vec<PathBuf>, String)>>,
        fail: bool,
    }

    impl TagAssigner for RecordingAssigner {
        fn assign_tag(&self, paths: &[PathBuf], tag: &str) -> Result<(), TaggingError> {
            if self.fail {
                return Err(TaggingError::Rejected("store offline".into()));
            }
            self.calls.borrow_mut().push((paths.to_vec(), tag.to_string()));
            Ok(())
        }
    }

    fn items() -> Vec<TaggingItem> {
        vec![
            TaggingItem::new("/root/a.txt", "a.txt"),
            TaggingItem::new("/root/b.txt", "b.txt"),
        ]
    }

    #[test]
    fn test_submit_assigns_trimmed_tag() {
        let assigner = RecordingAssigner::default();
        let mut panel = TaggingPanel::new();
        panel.set_input("  work ");

        let outcome = panel.submit(&assigner, &items());

        assert_eq!(
            outcome,
            SubmitOutcome::Assigned {
                tag: "work".into(),
                count: 2
            }
        );
        assert!(panel.input().is_empty());
        let calls = assigner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "work");
        assert_eq!(calls[0].0[1], PathBuf::from("/root/b.txt"));
    }

    #[test]
    fn test_submit_rejects_blank_tag() {
        let assigner = RecordingAssigner::default();
        let mut panel = TaggingPanel::new();
        panel.set_input("   ");

        assert_eq!(panel.submit(&assigner, &items()), SubmitOutcome::EmptyTag);
        assert!(assigner.calls.borrow().is_empty());
    }

    #[test]
    fn test_submit_rejects_empty_items() {
        let assigner = RecordingAssigner::default();
        let mut panel = TaggingPanel::new();
        panel.set_input("work");

        assert_eq!(panel.submit(&assigner, &[]), SubmitOutcome::NoItems);
        assert!(assigner.calls.borrow().is_empty());
        assert_eq!(panel.input(), "work");
    }

    #[test]
    fn test_failed_submit_keeps_input() {
        let assigner = RecordingAssigner {
            fail: true,
            ..RecordingAssigner::default()
        };
        let mut panel = TaggingPanel::new();
        panel.set_input("work");

        let outcome = panel.submit(&assigner, &items());
        assert!(matches!(outcome, SubmitOutcome::Failed(msg) if msg.contains("store offline")));
        assert_eq!(panel.input(), "work");
    }

    #[test]
    fn test_database_assigner() {
        let test_db = TestDb::new();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("note.txt");
        std::fs::write(&file, b"x").unwrap();

        let mut panel = TaggingPanel::new();
        panel.set_input("notes");
        let items = vec![TaggingItem::new(file.clone(), "note.txt")];
        let outcome = panel.submit(test_db.db(), &items);

        assert!(matches!(outcome, SubmitOutcome::Assigned { count: 1, .. }));
        assert_eq!(test_db.db().own_tags(&file).unwrap(), vec!["notes".to_string()]);
    }

    #[test]
    fn test_input_editing() {
        let mut panel = TaggingPanel::new();
        panel.push('a');
        panel.push('b');
        panel.pop();
        assert_eq!(panel.input(), "a");
        panel.clear();
        assert!(panel.input().is_empty());
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut panel = TaggingPanel::new();
        panel.cursor_up();
        assert_eq!(panel.cursor(), 0);

        panel.cursor_down(3);
        panel.cursor_down(3);
        panel.cursor_down(3);
        assert_eq!(panel.cursor(), 2);

        panel.clamp_cursor(1);
        assert_eq!(panel.cursor(), 0);
        panel.clamp_cursor(0);
        assert_eq!(panel.cursor(), 0);
    }
}
