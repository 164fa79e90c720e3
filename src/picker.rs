//! Directory picker collaborator
//!
//! Lets the user choose a directory to explore. The explorer suspends its
//! terminal UI while a picker runs.

use dialoguer::{Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Failed to read input: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),
}

/// Chooses zero or one directory
pub trait DirectoryPicker {
    /// Ask for a directory, starting from `start`
    ///
    /// Returns `Ok(None)` when the user cancels.
    ///
    /// # Errors
    ///
    /// Returns `PickerError` if the prompt fails or the choice is not a
    /// directory.
    fn pick_directory(&self, start: &Path) -> Result<Option<PathBuf>, PickerError>;
}

/// Text prompt on the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptPicker;

impl DirectoryPicker for PromptPicker {
    fn pick_directory(&self, start: &Path) -> Result<Option<PathBuf>, PickerError> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Directory to explore (empty to cancel)")
            .with_initial_text(start.to_string_lossy())
            .allow_empty(true)
            .interact_text()?;

        resolve_choice(start, &answer)
    }
}

/// Turn prompt input into a directory, relative paths taken from `start`
fn resolve_choice(start: &Path, answer: &str) -> Result<Option<PathBuf>, PickerError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }

    let path = start.join(answer);
    if !path.is_dir() {
        return Err(PickerError::NotADirectory(path));
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_cancels() {
        assert!(resolve_choice(Path::new("/"), "  ").unwrap().is_none());
    }

    #[test]
    fn test_relative_answer_joins_start() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let picked = resolve_choice(dir.path(), "sub").unwrap();
        assert_eq!(picked, Some(dir.path().join("sub")));
    }

    #[test]
    fn test_absolute_answer_replaces_start() {
        let dir = tempfile::tempdir().unwrap();
        let answer = dir.path().to_string_lossy().into_owned();

        let picked = resolve_choice(Path::new("/nonexistent"), &answer).unwrap();
        assert_eq!(picked, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();

        let result = resolve_choice(dir.path(), "file.txt");
        assert!(matches!(result, Err(PickerError::NotADirectory(_))));
    }
}
