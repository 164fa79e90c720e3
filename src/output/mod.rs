//! Output formatting for CLI display
//!
//! Line formats shared by the `scan`, `tags` and `tag` commands.

use crate::explore::format::{format_date_time, size_cell, tags_cell};
use crate::explore::rows::TableRow;
use colored::Colorize;
use std::path::Path;

/// Color a path based on file existence (green if exists, red if missing)
#[must_use]
pub fn colorize_path(path: &Path) -> String {
    let formatted = path.display().to_string();
    if path.exists() {
        formatted.green().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// One listing line: name, modified, size, tags
#[must_use]
pub fn table_row_line(row: &TableRow, quiet: bool) -> String {
    if quiet {
        return row.id.clone();
    }

    let name = if row.entry.is_directory {
        format!("{}/", row.name).blue().bold().to_string()
    } else {
        row.name.clone()
    };

    format!(
        "  {name:<32} {:<19}  {:>10}  {}",
        format_date_time(row.entry.modified),
        size_cell(&row.entry),
        tags_cell(&row.entry).yellow()
    )
}

/// Tags of a single path, inherited ones marked
#[must_use]
pub fn tags_line(own: &[String], inherited: &[String], quiet: bool) -> String {
    if quiet {
        return own
            .iter()
            .chain(inherited.iter().filter(|tag| !own.contains(tag)))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
    }

    let own = if own.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        own.join(", ")
    };
    let inherited = if inherited.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        inherited.join(", ")
    };

    format!("  own:       {own}\n  inherited: {inherited}")
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} path(s))")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explore::rows::build_table_rows;
    use crate::testing::sample_tree;

    #[test]
    fn test_quiet_row_is_path() {
        let data = build_table_rows(&sample_tree());
        assert_eq!(table_row_line(&data.rows[2], true), "/root/example.txt");
    }

    #[test]
    fn test_row_line_contains_cells() {
        colored::control::set_override(false);
        let data = build_table_rows(&sample_tree());
        let line = table_row_line(&data.rows[1], false);
        assert!(line.contains("dir/"));
        assert!(line.contains('-'));
    }

    #[test]
    fn test_tags_line_quiet_merges() {
        let own = vec!["a".to_string()];
        let inherited = vec!["a".to_string(), "b".to_string()];
        assert_eq!(tags_line(&own, &inherited, true), "a\nb");
    }

    #[test]
    fn test_tag_with_count() {
        assert_eq!(tag_with_count("work", 3, false), "  work (used by 3 path(s))");
        assert_eq!(tag_with_count("work", 3, true), "work");
    }
}
