//! Browse command - the interactive explorer

use crate::picker::DirectoryPicker;
use crate::scan::DirectoryScanner;
use crate::tagging::TagAssigner;
use crate::ui::{ExploreOptions, Explorer};
use crate::CrucibleError;
use std::path::PathBuf;
use std::sync::Arc;

type Result<T> = std::result::Result<T, CrucibleError>;

/// Execute the browse command
///
/// With `pick` set the start directory is chosen with the picker first;
/// cancelling the picker ends the command without opening the explorer.
///
/// # Errors
/// Returns an error if the picker fails or the terminal cannot be driven
pub fn execute(
    scanner: Arc<dyn DirectoryScanner>,
    assigner: &dyn TagAssigner,
    picker: &dyn DirectoryPicker,
    mut options: ExploreOptions,
    pick: bool,
    quiet: bool,
) -> Result<()> {
    if pick {
        let start = match &options.start {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        match picker.pick_directory(&start)? {
            Some(path) => options.start = Some(path),
            None => {
                if !quiet {
                    println!("Browse cancelled.");
                }
                return Ok(());
            }
        }
    }

    Explorer::new(scanner, assigner, picker).run(&options)?;
    Ok(())
}

/// Resolve the start directory given on the command line
#[must_use]
pub fn start_directory(path: Option<PathBuf>) -> Option<PathBuf> {
    path.map(|path| path.canonicalize().unwrap_or(path))
}
