//! Application state for the explorer
//!
//! Wraps the [`ExploreSession`] with what only the terminal front end needs:
//! cursors, focus, scroll offset and status messages.

use crate::explore::{ExploreSession, TableRow};
use crate::tagging::TaggingPanel;
use std::time::{Duration, Instant};

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    /// Item list of the tagging panel
    Panel,
    /// Tag name input of the tagging panel
    TagInput,
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

#[derive(Debug)]
pub struct AppState {
    pub session: ExploreSession,
    pub panel: TaggingPanel,
    pub focus: Focus,
    /// Row index under the table cursor
    pub cursor: usize,
    /// First table row drawn
    pub scroll_offset: usize,
    pub messages: Vec<StatusMessage>,
    pub message_ttl: Duration,
    /// Width budget for the header path
    pub max_path_length: usize,
    pub should_exit: bool,
}

impl AppState {
    #[must_use]
    pub fn new(session: ExploreSession, max_path_length: usize) -> Self {
        Self {
            session,
            panel: TaggingPanel::new(),
            focus: Focus::Table,
            cursor: 0,
            scroll_offset: 0,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            max_path_length,
            should_exit: false,
        }
    }

    /// Row under the cursor
    #[must_use]
    pub fn current_row(&self) -> Option<&TableRow> {
        self.session.rows().get(self.cursor)
    }

    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.session.rows().len() {
            self.cursor += 1;
        }
    }

    /// Reset cursors after the listing changed
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
        self.panel.clamp_cursor(0);
        if self.focus != Focus::Table && !self.session.selection().is_panel_visible() {
            self.focus = Focus::Table;
        }
    }

    /// Keep cursors valid after the panel contents changed
    pub fn sync_panel(&mut self) {
        let items = self.session.panel_items().len();
        self.panel.clamp_cursor(items);
        if !self.session.selection().is_panel_visible() {
            self.focus = Focus::Table;
        }
    }

    /// Scroll so the cursor stays inside a window of `height` rows
    pub const fn adjust_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    pub fn push_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Drop expired status messages
    pub fn prune_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|message| !message.is_expired(ttl));
    }

    /// Most recent status message
    #[must_use]
    pub fn latest_message(&self) -> Option<&StatusMessage> {
        self.messages.last()
    }
}
