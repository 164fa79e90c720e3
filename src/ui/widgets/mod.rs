//! Ratatui widgets for the explorer
//!
//! Custom widgets for rendering the table, the tagging panel and the
//! surrounding bars.

mod file_table;
mod header;
mod help_bar;
mod status_bar;
mod tagging_panel;

pub use file_table::FileTable;
pub use header::Header;
pub use help_bar::{HelpBar, KeyHint};
pub use status_bar::StatusBar;
pub use tagging_panel::TaggingPanelView;
