//! Header line with the shortened current directory

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    label: &'a str,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    #[must_use]
    pub const fn new(label: &'a str, loading: bool, theme: &'a Theme) -> Self {
        Self { label, loading, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" tag-crucible ", self.theme.accent_style()),
            Span::styled(self.label, self.theme.directory_style()),
        ];
        if self.loading {
            spans.push(Span::styled("  scanning…", self.theme.dimmed_style()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
