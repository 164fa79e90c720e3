//! Scan command - print a directory listing without the explorer

use crate::explore::{TableData, build_table_rows};
use crate::scan::DirectoryScanner;
use crate::{CrucibleError, output};
use std::path::Path;

type Result<T> = std::result::Result<T, CrucibleError>;

/// Execute the scan command
///
/// # Errors
/// Returns an error if the scan fails or JSON serialization fails
pub fn execute(
    scanner: &dyn DirectoryScanner,
    path: Option<&Path>,
    depth: usize,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let data = listing(scanner, path, depth)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data.rows)?);
        return Ok(());
    }

    if !quiet && let Some(current) = data.rows.first() {
        println!("{}", output::colorize_path(&current.entry.path));
    }
    for row in &data.rows {
        println!("{}", output::table_row_line(row, quiet));
    }
    Ok(())
}

/// Scan `path` and project the result into table rows
///
/// # Errors
/// Returns `CrucibleError::Scan` if the scan fails
pub fn listing(scanner: &dyn DirectoryScanner, path: Option<&Path>, depth: usize) -> Result<TableData> {
    let tree = scanner.scan(path, depth)?;
    Ok(build_table_rows(&tree))
}
