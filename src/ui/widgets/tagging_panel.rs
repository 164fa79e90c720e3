//! Tagging panel widget: listed items, group toggle hint and tag input

use crate::selection::{PanelState, TaggingItem};
use crate::ui::state::Focus;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct TaggingPanelView<'a> {
    items: &'a [TaggingItem],
    cursor: usize,
    input: &'a str,
    state: PanelState,
    /// Whether the group toggle is available (every row selected)
    can_group: bool,
    focus: Focus,
    theme: &'a Theme,
}

impl<'a> TaggingPanelView<'a> {
    #[must_use]
    pub const fn new(items: &'a [TaggingItem], input: &'a str, theme: &'a Theme) -> Self {
        Self {
            items,
            cursor: 0,
            input,
            state: PanelState::OpenIndividual,
            can_group: false,
            focus: Focus::Table,
            theme,
        }
    }

    #[must_use]
    pub const fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub const fn with_state(mut self, state: PanelState, can_group: bool) -> Self {
        self.state = state;
        self.can_group = can_group;
        self
    }

    #[must_use]
    pub const fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }

    fn group_hint(&self) -> Line<'a> {
        match (self.state, self.can_group) {
            (PanelState::OpenAggregate, _) => Line::from(vec![
                Span::styled("g", self.theme.accent_style()),
                Span::raw(" tag individually"),
            ]),
            (_, true) => Line::from(vec![
                Span::styled("g", self.theme.accent_style()),
                Span::raw(" tag as group"),
            ]),
            (_, false) => Line::default(),
        }
    }
}

impl Widget for TaggingPanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.state {
            PanelState::OpenAggregate => " Tagging (group) ",
            _ => " Tagging ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focus == Focus::Panel))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(3)])
            .split(inner);

        if self.items.is_empty() {
            Paragraph::new(Line::styled("No items selected.", self.theme.dimmed_style()))
                .render(chunks[0], buf);
        } else {
            let items: Vec<ListItem> = self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let line = Line::raw(item.display_name.as_str());
                    if index == self.cursor && self.focus == Focus::Panel {
                        ListItem::new(line).style(self.theme.cursor_style())
                    } else {
                        ListItem::new(line)
                    }
                })
                .collect();
            List::new(items).render(chunks[0], buf);
        }

        Paragraph::new(self.group_hint()).render(chunks[1], buf);

        let editing = self.focus == Focus::TagInput;
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(editing))
            .title(" Tag ");
        let mut spans = vec![Span::raw(self.input)];
        if editing {
            spans.push(Span::styled("▏", self.theme.accent_style()));
        }
        Paragraph::new(Line::from(spans))
            .block(input_block)
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_lists_items_and_input() {
        let items = vec![TaggingItem::new("/root/a.txt", "a.txt")];
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);

        TaggingPanelView::new(&items, "wor", &theme)
            .with_focus(Focus::TagInput)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("a.txt"));
        assert!(text.contains("wor"));
    }

    #[test]
    fn test_group_hint() {
        let items = vec![TaggingItem::new("/root", "/root")];
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);

        TaggingPanelView::new(&items, "", &theme)
            .with_state(PanelState::OpenAggregate, true)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("(group)"));
        assert!(text.contains("tag individually"));
    }
}
