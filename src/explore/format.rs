//! Cell formatting for the explore table

use crate::scan::FileEntry;
use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local, Utc};

/// Placeholder for cells without a meaningful value
pub const EMPTY_CELL: &str = "-";

/// Format a modification time in local time as `YYYY/MM/DD HH:MM:SS`
#[must_use]
pub fn format_date_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(
        || EMPTY_CELL.to_string(),
        |t| t.with_timezone(&Local).format("%Y/%m/%d %H:%M:%S").to_string(),
    )
}

/// Format a byte count, switching to binary units from 1 KiB upwards
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{adjusted:.2}")
}

/// Size column value; directories have no meaningful size
#[must_use]
pub fn size_cell(entry: &FileEntry) -> String {
    if entry.is_directory {
        EMPTY_CELL.to_string()
    } else {
        format_file_size(entry.size)
    }
}

/// Tags column value: own tags first, inherited tags prefixed with `^`
#[must_use]
pub fn tags_cell(entry: &FileEntry) -> String {
    let own = entry.own_tags.iter().cloned();
    let inherited = entry
        .inherited_tags
        .iter()
        .filter(|tag| !entry.own_tags.contains(tag))
        .map(|tag| format!("^{tag}"));

    own.chain(inherited).collect::<Vec<_>>().join(" ")
}
