//! Status bar widget for displaying the latest message

use crate::ui::state::{MessageLevel, StatusMessage};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct StatusBar<'a> {
    message: Option<&'a StatusMessage>,
    /// Shown on the right, e.g. the sort order
    detail: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(message: Option<&'a StatusMessage>, detail: &'a str, theme: &'a Theme) -> Self {
        Self {
            message,
            detail,
            theme,
        }
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = self.message {
            let style = self.style_for_level(message.level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(message.level), style),
                Span::styled(message.text.as_str(), style),
            ]);
            Paragraph::new(line).render(area, buf);
        }

        if !self.detail.is_empty() {
            Paragraph::new(Line::styled(self.detail, self.theme.dimmed_style()).right_aligned())
                .render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_renders_latest_message() {
        let theme = Theme::default();
        let message = StatusMessage::new(MessageLevel::Error, "scan failed");
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);

        StatusBar::new(Some(&message), "", &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("scan failed"));
    }

    #[test]
    fn test_renders_detail() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);

        StatusBar::new(None, "Name ↑", &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).trim_end().ends_with('↑'));
    }
}
