//! Path shortening for constrained labels
//!
//! The last segment (the directory or file the user is looking at) is always
//! shown in full. Intermediate segments are shortened in tiers until the
//! result fits:
//!
//! 1. The normalized path as-is
//! 2. Intermediate segments clamped to 3 characters
//! 3. Intermediate segments clamped to 1 character
//! 4. An ellipsis in place of every intermediate segment, then a tail-biased
//!    truncation of the last segment itself
//!
//! A leading root marker (the empty first segment of a Unix absolute path or a
//! Windows drive such as `C:`) is never shortened.
//!
//! Lengths are counted in characters, so `…` counts as one.
//!
//! # Examples
//!
//! ```
//! use tag_crucible::explore::format_path_for_display;
//!
//! assert_eq!(
//!     format_path_for_display("/Users/example/projects/subdir", 17),
//!     "/U/e/p/subdir"
//! );
//! ```

/// Marker used when intermediate segments are dropped entirely
pub const ELLIPSIS: char = '…';

/// Shorten `path` so that it is at most `max_length` characters long
///
/// Supports both `/` and `\` separated paths; a path containing any `\` is
/// treated as a Windows path. Never fails: an empty path or a zero
/// `max_length` yields an empty string.
#[must_use]
pub fn format_path_for_display(path: &str, max_length: usize) -> String {
    if max_length == 0 || path.is_empty() {
        return String::new();
    }

    let separator = if path.contains('\\') { '\\' } else { '/' };
    let normalized = strip_trailing_separators(path, separator);

    if char_len(normalized) <= max_length {
        return normalized.to_string();
    }

    let mut segments: Vec<&str> = normalized.split(separator).collect();
    let last = segments.pop().unwrap_or_default();
    if last.is_empty() {
        return tail(normalized, max_length).to_string();
    }

    let prefix = segments;
    let reserved_first = prefix
        .first()
        .is_some_and(|first| first.is_empty() || is_drive_letter(first));

    for limit in [3, 1] {
        let candidate = build_candidate(&prefix, last, separator, limit, reserved_first);
        if char_len(&candidate) <= max_length {
            return candidate;
        }
    }

    let last_len = char_len(last);
    if last_len + 2 <= max_length {
        return format!("{ELLIPSIS}{separator}{last}");
    }
    if last_len + 1 <= max_length {
        return format!("{ELLIPSIS}{last}");
    }
    if max_length == 1 {
        return tail(last, 1).to_string();
    }

    format!("{ELLIPSIS}{}", tail(last, max_length - 1))
}

/// Remove trailing separators, keeping `/` and `X:\` roots intact
fn strip_trailing_separators(path: &str, separator: char) -> &str {
    if path == "/" || is_drive_root(path) {
        return path;
    }

    let mut normalized = path;
    while char_len(normalized) > 1 && normalized.ends_with(separator) {
        normalized = &normalized[..normalized.len() - separator.len_utf8()];
    }
    normalized
}

fn build_candidate(
    prefix: &[&str],
    last: &str,
    separator: char,
    limit: usize,
    reserved_first: bool,
) -> String {
    if prefix.is_empty() {
        return last.to_string();
    }
    if prefix.len() == 1 && prefix[0].is_empty() {
        return format!("{separator}{last}");
    }

    let mut out = String::new();
    for (index, segment) in prefix.iter().enumerate() {
        if index == 0 && reserved_first {
            out.push_str(segment);
        } else {
            out.extend(segment.chars().take(limit));
        }
        out.push(separator);
    }
    out.push_str(last);
    out
}

/// `X:` with an ASCII drive letter
fn is_drive_letter(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// `X:\` with an ASCII drive letter
fn is_drive_root(path: &str) -> bool {
    path.len() == 3 && is_drive_letter(&path[..2]) && path.ends_with('\\')
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The last `count` characters of `s`
fn tail(s: &str, count: usize) -> &str {
    let len = char_len(s);
    if count >= len {
        return s;
    }
    let start = s
        .char_indices()
        .nth(len - count)
        .map_or(s.len(), |(index, _)| index);
    &s[start..]
}
