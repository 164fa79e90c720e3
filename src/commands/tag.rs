//! Tag and untag commands

use crate::{CrucibleError, db::Database};
use std::path::PathBuf;

type Result<T> = std::result::Result<T, CrucibleError>;

/// Execute the tag command - add one tag to every path
///
/// # Errors
/// Returns an error if a path does not exist or database operations fail
pub fn execute(db: &Database, tag: &str, paths: &[PathBuf], quiet: bool) -> Result<()> {
    let paths = existing_paths(paths)?;

    db.assign_tag_to_paths(&paths, tag)?;
    db.flush()?;

    if !quiet {
        println!("Tagged {} path(s) with: {}", paths.len(), tag.trim());
    }
    Ok(())
}

/// Execute the untag command - remove one own tag from every path
///
/// Inherited tags live on an ancestor and are left alone.
///
/// # Errors
/// Returns an error if a path does not exist or database operations fail
pub fn untag(db: &Database, tag: &str, paths: &[PathBuf], quiet: bool) -> Result<()> {
    let paths = existing_paths(paths)?;
    let mut removed = 0;

    for path in &paths {
        if db.remove_tag(path, tag)? {
            removed += 1;
        } else if !quiet {
            eprintln!("Warning: {} is not tagged with '{tag}'", path.display());
        }
    }
    db.flush()?;

    if !quiet {
        println!("Removed '{tag}' from {removed} path(s)");
    }
    Ok(())
}

fn existing_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths
        .iter()
        .map(|path| {
            path.canonicalize().map_err(|e| {
                CrucibleError::InvalidInput(format!("Cannot access path '{}': {e}", path.display()))
            })
        })
        .collect()
}
