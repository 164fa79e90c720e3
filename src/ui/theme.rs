//! Color theme definitions for the explorer
//!
//! Defines colors and styles used throughout the interface.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the explorer
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the row under the cursor
    pub cursor_bg: Color,
    /// Marker color for selected rows
    pub selected: Color,
    /// Color for the focused pane border and key hints
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    pub tag: Color,
    pub directory: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            cursor_bg: Color::DarkGray,
            selected: Color::Green,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            tag: Color::Magenta,
            directory: Color::Blue,
        }
    }

    /// Style for the row under the cursor
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default().bg(self.cursor_bg).add_modifier(Modifier::BOLD)
    }

    /// Style for the selection marker
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.selected).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Border style, highlighted when the pane has focus
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn tag_style(&self) -> Style {
        Style::default().fg(self.tag)
    }

    #[must_use]
    pub fn directory_style(&self) -> Style {
        Style::default().fg(self.directory).add_modifier(Modifier::BOLD)
    }
}
