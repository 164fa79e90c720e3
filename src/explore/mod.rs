//! Explorer core: row projection, sorting, navigation and the session that
//! ties them to the selection engine
//!
//! Nothing in here touches the terminal, so the whole explorer flow can be
//! driven from tests.

pub mod format;
pub mod navigator;
pub mod path_display;
pub mod rows;
pub mod session;
pub mod sort;

pub use navigator::{DirectoryNavigator, ScanOutcome, ScanRequest, ScanRequestId, ScanTarget};
pub use path_display::{ELLIPSIS, format_path_for_display};
pub use rows::{CURRENT_DIRECTORY_LABEL, TableData, TableRow, build_table_rows, build_table_rows_with_label};
pub use session::ExploreSession;
pub use sort::{SortColumn, SortDirection, SortState, sort_rows};
