//! Type wrappers for tag store keys
//!
//! `PathKey` encodes a normalized path as the key of the `files` tree.
//! `PathString` is the UTF-8 form stored in the `tags` reverse index; paths
//! that are not valid UTF-8 cannot be tagged.
//!
//! # Examples
//!
//! ```
//! use tag_crucible::db::types::{PathKey, PathString};
//!
//! let key = PathKey::new("file.txt");
//! let bytes: Vec<u8> = key.try_into().unwrap();
//! assert!(!bytes.is_empty());
//!
//! let path_str = PathString::new("file.txt").unwrap();
//! assert_eq!(&*path_str, "file.txt");
//! ```

use super::error::DbError;
use std::path::{Path, PathBuf};

/// Wrapper for `PathBuf` that can be converted to `Vec<u8>` for database keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKey(PathBuf);

impl TryFrom<PathKey> for Vec<u8> {
    type Error = DbError;

    fn try_from(key: PathKey) -> Result<Self, Self::Error> {
        Ok(bincode::encode_to_vec(&key.0, bincode::config::standard())?)
    }
}

impl PathKey {
    /// Key for `path`, which should already be normalized
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self(path.as_ref().to_path_buf())
    }
}

/// Wrapper for a path that guarantees valid UTF-8 string representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathString(String);

impl PathString {
    /// # Errors
    ///
    /// Returns `DbError` if the path contains invalid UTF-8 characters.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        path.as_ref()
            .to_str()
            .ok_or_else(|| DbError::SerializeError("Invalid UTF-8 in path".into()))
            .map(|s| Self(s.to_string()))
    }
}

impl std::ops::Deref for PathString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
