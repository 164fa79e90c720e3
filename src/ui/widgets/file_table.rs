//! Explore table widget
//!
//! Columns: selection marker, name, modified, size, tags. The header shows
//! the active sort indicator.

use crate::explore::format::{format_date_time, size_cell, tags_cell};
use crate::explore::{ExploreSession, SortColumn};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

pub struct FileTable<'a> {
    session: &'a ExploreSession,
    cursor: usize,
    scroll_offset: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FileTable<'a> {
    #[must_use]
    pub const fn new(
        session: &'a ExploreSession,
        cursor: usize,
        scroll_offset: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            cursor,
            scroll_offset,
            focused,
            theme,
        }
    }

    /// Rows that fit below the border and header of a table drawn in `area`
    #[must_use]
    pub const fn visible_rows(area: Rect) -> usize {
        area.height.saturating_sub(3) as usize
    }

    fn header(&self) -> Row<'a> {
        let sort = self.session.sort();
        let title = |column: SortColumn| format!("{}{}", column.label(), sort.indicator(column));

        Row::new(vec![
            Cell::from(""),
            Cell::from(title(SortColumn::Name)),
            Cell::from(title(SortColumn::Modified)),
            Cell::from(title(SortColumn::Size)),
            Cell::from("Tags"),
        ])
        .style(self.theme.accent_style())
    }
}

impl Widget for FileTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused))
            .title(" Files ");

        let session = self.session;
        let navigator = session.navigator();

        if session.rows().is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            let text = match navigator.error() {
                Some(error) => Line::styled(error.to_string(), self.theme.error_style()),
                None if navigator.is_loading() => Line::styled("Scanning…", self.theme.dimmed_style()),
                None => Line::styled("Nothing to show", self.theme.dimmed_style()),
            };
            Paragraph::new(text).render(inner, buf);
            return;
        }

        let height = Self::visible_rows(area);
        let rows = session
            .rows()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(height)
            .map(|(index, row)| {
                let marker = if session.is_selected(&row.id) {
                    Span::styled("●", self.theme.selected_style())
                } else {
                    Span::raw(" ")
                };
                let name = if row.entry.is_directory {
                    Span::styled(row.name.clone(), self.theme.directory_style())
                } else {
                    Span::raw(row.name.clone())
                };

                let cells = vec![
                    Cell::from(marker),
                    Cell::from(name),
                    Cell::from(format_date_time(row.entry.modified)),
                    Cell::from(size_cell(&row.entry)),
                    Cell::from(Span::styled(tags_cell(&row.entry), self.theme.tag_style())),
                ];

                let row_widget = Row::new(cells);
                if index == self.cursor && self.focused {
                    row_widget.style(self.theme.cursor_style())
                } else if index == self.cursor {
                    row_widget.style(self.theme.dimmed_style())
                } else {
                    row_widget
                }
            });

        let widths = [
            Constraint::Length(1),
            Constraint::Min(16),
            Constraint::Length(19),
            Constraint::Length(10),
            Constraint::Percentage(30),
        ];

        Table::new(rows, widths)
            .header(self.header())
            .column_spacing(1)
            .block(block)
            .render(area, buf);
    }
}
