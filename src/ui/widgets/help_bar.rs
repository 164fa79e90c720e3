//! Help bar widget for displaying keybind hints

use crate::ui::state::Focus;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Space", "Enter")
    pub key: &'static str,
    /// Action description (e.g., "select", "open")
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for the focused pane
    #[must_use]
    pub fn hints_for(focus: Focus) -> Vec<KeyHint> {
        match focus {
            Focus::Table => vec![
                KeyHint::new("Space", "select"),
                KeyHint::new("a", "all"),
                KeyHint::new("Enter", "open"),
                KeyHint::new("Bksp", "parent"),
                KeyHint::new("s", "sort"),
                KeyHint::new("g", "group"),
                KeyHint::new("t", "tag"),
                KeyHint::new("o", "pick"),
                KeyHint::new("r", "rescan"),
                KeyHint::new("q", "quit"),
            ],
            Focus::Panel => vec![
                KeyHint::new("j/k", "move"),
                KeyHint::new("x", "remove"),
                KeyHint::new("t", "tag"),
                KeyHint::new("g", "group"),
                KeyHint::new("c", "close"),
                KeyHint::new("Tab", "table"),
            ],
            Focus::TagInput => vec![
                KeyHint::new("Enter", "add tag"),
                KeyHint::new("Esc", "back"),
            ],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key, self.theme.accent_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
