//! Shorten command - print the header form of a path

use crate::explore::format_path_for_display;

/// Execute the shorten command
pub fn execute(path: &str, max_length: usize) {
    println!("{}", format_path_for_display(path, max_length));
}
