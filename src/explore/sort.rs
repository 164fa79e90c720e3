//! Column sorting for the explore table
//!
//! Pinned rows (the current directory) always stay on top in their original
//! order; the remaining rows are sorted stably so equal keys keep scan order.

use super::rows::TableRow;
use std::cmp::Ordering;

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Modified,
    Size,
}

impl SortColumn {
    /// Header label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Modified => "Modified",
            Self::Size => "Size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort; `column = None` keeps scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub const fn by(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Step through unsorted → Name ↑ → Name ↓ → Modified ↑ → … → Size ↓ → unsorted
    #[must_use]
    pub const fn cycle(self) -> Self {
        use SortColumn::{Modified, Name, Size};
        use SortDirection::{Ascending, Descending};

        match (self.column, self.direction) {
            (None, _) => Self::by(Name, Ascending),
            (Some(column), Ascending) => Self::by(column, Descending),
            (Some(Name), Descending) => Self::by(Modified, Ascending),
            (Some(Modified), Descending) => Self::by(Size, Ascending),
            (Some(Size), Descending) => Self {
                column: None,
                direction: Ascending,
            },
        }
    }

    /// Header indicator for `column`
    #[must_use]
    pub fn indicator(&self, column: SortColumn) -> &'static str {
        match (self.column, self.direction) {
            (Some(active), SortDirection::Ascending) if active == column => "↑",
            (Some(active), SortDirection::Descending) if active == column => "↓",
            _ => "",
        }
    }
}

/// Sort `rows` in place according to `sort`, keeping `pinned` rows first
pub fn sort_rows(rows: &mut Vec<TableRow>, sort: &SortState, pinned: &[String]) {
    let (mut top, mut rest): (Vec<TableRow>, Vec<TableRow>) =
        rows.drain(..).partition(|row| pinned.contains(&row.id));

    if let Some(column) = sort.column {
        rest.sort_by(|a, b| {
            let ordering = compare(a, b, column);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    rows.append(&mut top);
    rows.append(&mut rest);
}

fn compare(a: &TableRow, b: &TableRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Modified => a.entry.modified.cmp(&b.entry.modified),
        // Directories carry no size and sort before files
        SortColumn::Size => size_key(a).cmp(&size_key(b)),
    }
}

fn size_key(row: &TableRow) -> Option<u64> {
    (!row.entry.is_directory).then_some(row.entry.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::rows::build_table_rows;
    use crate::testing::{node, sample_tree};

    fn names(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|row| row.name.as_str()).collect()
    }

    fn wide_tree() -> crate::scan::DirectoryNode {
        let mut root = node("/root", true, vec![]);
        let mut small = node("/root/b-small.txt", false, vec![]);
        small.info.size = 10;
        let mut big = node("/root/a-big.txt", false, vec![]);
        big.info.size = 5000;
        let dir = node("/root/c-dir", true, vec![]);
        root.children = vec![dir, big, small];
        root
    }

    #[test]
    fn test_unsorted_keeps_scan_order() {
        let mut data = build_table_rows(&wide_tree());
        sort_rows(&mut data.rows, &SortState::default(), &data.pinned_row_ids);
        assert_eq!(names(&data.rows), vec![".", "c-dir", "a-big.txt", "b-small.txt"]);
    }

    #[test]
    fn test_sort_by_name_keeps_pinned_first() {
        let mut data = build_table_rows(&wide_tree());
        let sort = SortState::by(SortColumn::Name, SortDirection::Descending);
        sort_rows(&mut data.rows, &sort, &data.pinned_row_ids);
        assert_eq!(names(&data.rows), vec![".", "c-dir", "b-small.txt", "a-big.txt"]);
    }

    #[test]
    fn test_sort_by_size_puts_directories_first() {
        let mut data = build_table_rows(&wide_tree());
        let sort = SortState::by(SortColumn::Size, SortDirection::Ascending);
        sort_rows(&mut data.rows, &sort, &data.pinned_row_ids);
        assert_eq!(names(&data.rows), vec![".", "c-dir", "b-small.txt", "a-big.txt"]);
    }

    #[test]
    fn test_sort_preserves_row_set() {
        let mut data = build_table_rows(&sample_tree());
        let before = data.len();
        let sort = SortState::by(SortColumn::Modified, SortDirection::Descending);
        sort_rows(&mut data.rows, &sort, &data.pinned_row_ids);
        assert_eq!(data.len(), before);
        assert_eq!(data.rows[0].name, ".");
    }

    #[test]
    fn test_cycle_returns_to_unsorted() {
        let mut sort = SortState::default();
        let mut seen = Vec::new();
        for _ in 0..7 {
            sort = sort.cycle();
            seen.push(sort);
        }
        assert_eq!(seen[0], SortState::by(SortColumn::Name, SortDirection::Ascending));
        assert_eq!(seen[1], SortState::by(SortColumn::Name, SortDirection::Descending));
        assert_eq!(seen[5], SortState::by(SortColumn::Size, SortDirection::Descending));
        assert_eq!(seen[6], SortState::default());
    }

    #[test]
    fn test_indicator() {
        let sort = SortState::by(SortColumn::Size, SortDirection::Descending);
        assert_eq!(sort.indicator(SortColumn::Size), "↓");
        assert_eq!(sort.indicator(SortColumn::Name), "");
    }
}
