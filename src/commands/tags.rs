//! Tags command - show the tags of one path or every known tag

use crate::{CrucibleError, db::Database, output};
use std::path::Path;

type Result<T> = std::result::Result<T, CrucibleError>;

/// Execute the tags command
///
/// # Errors
/// Returns an error if database operations fail
pub fn execute(db: &Database, path: Option<&Path>, quiet: bool) -> Result<()> {
    match path {
        Some(path) => show_path_tags(db, path, quiet),
        None => list_all_tags(db, quiet),
    }
}

fn show_path_tags(db: &Database, path: &Path, quiet: bool) -> Result<()> {
    let own = db.own_tags(path)?;
    let inherited = db.inherited_tags(path)?;

    if !quiet {
        println!("{}", output::colorize_path(path));
    }
    let line = output::tags_line(&own, &inherited, quiet);
    if !line.is_empty() {
        println!("{line}");
    }
    Ok(())
}

fn list_all_tags(db: &Database, quiet: bool) -> Result<()> {
    let tags = db.list_tags()?;

    if tags.is_empty() {
        if !quiet {
            println!("No tags found in database.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in database:");
    }
    for tag in &tags {
        let count = db.files_with_tag(tag)?.len();
        println!("{}", output::tag_with_count(tag, count, quiet));
    }
    Ok(())
}
