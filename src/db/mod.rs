//! Tag store for tag-crucible
//!
//! Persists the tags users attach to files and directories using sled as
//! the embedded database backend.
//!
//! Uses two sled trees for efficient lookups:
//! - `files`: path -> own tags
//! - `tags`: tag -> paths (reverse index)
//!
//! Paths are canonicalized before they are used as keys so that the same
//! entry reached through different relative paths shares one record. When a
//! path cannot be canonicalized (e.g. it no longer exists) it is stored
//! as given.

use sled::transaction::ConflictableTransactionError;
use sled::{Db, Transactional, Tree};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod error;
pub mod types;

pub use error::DbError;
pub use types::{PathKey, PathString};

/// Read access to tags, used to annotate scanned entries
pub trait TagLookup: Send + Sync {
    /// Tags assigned directly to `path`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the lookup fails.
    fn own_tags(&self, path: &Path) -> Result<Vec<String>, DbError>;

    /// Tags assigned to any ancestor directory of `path`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the lookup fails.
    fn inherited_tags(&self, path: &Path) -> Result<Vec<String>, DbError>;
}

/// Database wrapper that encapsulates all tag store operations
///
/// Cloning is cheap: sled handles are reference counted, so a clone can be
/// handed to the scan worker thread.
#[derive(Clone)]
pub struct Database {
    db: Db,
    files: Tree, // path -> own tags
    tags: Tree,  // tag -> paths reverse index
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use tag_crucible::db::Database;
    /// let db = Database::open("my_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let files = db.open_tree("files")?;
        let tags = db.open_tree("tags")?;
        Ok(Self { db, files, tags })
    }

    /// Attach `tag` to every path in `paths`
    ///
    /// The tag is trimmed first. Paths are canonicalized and deduplicated;
    /// existing tags on each path are kept.
    ///
    /// # Errors
    ///
    /// Returns `DbError::EmptyTag` for a blank tag, `DbError::EmptyPaths` when
    /// no paths are given, or any storage error.
    pub fn assign_tag_to_paths<P: AsRef<Path>>(&self, paths: &[P], tag: &str) -> Result<(), DbError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(DbError::EmptyTag);
        }
        if paths.is_empty() {
            return Err(DbError::EmptyPaths);
        }

        let unique: BTreeSet<PathBuf> = paths
            .iter()
            .map(|path| {
                let normalized = normalize_path(path.as_ref());
                debug!(from = %path.as_ref().display(), to = %normalized.display(), "assigning tag");
                normalized
            })
            .collect();

        // Every key is encoded before the first write so a bad path cannot
        // leave the others tagged
        let mut records = Vec::with_capacity(unique.len());
        for path in &unique {
            let key: Vec<u8> = PathKey::new(path).try_into()?;
            records.push((key, PathString::new(path)?));
        }

        (&self.files, &self.tags)
            .transaction(|(files, tags)| {
                let mut index = match tags.get(tag.as_bytes())? {
                    Some(value) => decode_list(&value).map_err(ConflictableTransactionError::Abort)?,
                    None => Vec::new(),
                };

                for (key, index_path) in &records {
                    let mut own = match files.get(key.as_slice())? {
                        Some(value) => decode_list(&value).map_err(ConflictableTransactionError::Abort)?,
                        None => Vec::new(),
                    };
                    if !own.iter().any(|existing| existing == tag) {
                        own.push(tag.to_string());
                        own.sort();
                        let encoded = encode_list(&own).map_err(ConflictableTransactionError::Abort)?;
                        files.insert(key.as_slice(), encoded)?;
                    }
                    if !index.iter().any(|existing| existing == &**index_path) {
                        index.push(index_path.to_string());
                    }
                }

                let encoded = encode_list(&index).map_err(ConflictableTransactionError::Abort)?;
                tags.insert(tag.as_bytes(), encoded)?;
                Ok(())
            })
            .map_err(DbError::from)
    }

    /// Remove an own tag from `path`
    ///
    /// Inherited tags cannot be removed here; they belong to the ancestor.
    ///
    /// # Returns
    /// `true` if the tag was present and removed
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub fn remove_tag<P: AsRef<Path>>(&self, path: P, tag: &str) -> Result<bool, DbError> {
        let path = normalize_path(path.as_ref());
        let mut own = self.stored_tags(&path)?;
        let before = own.len();
        own.retain(|existing| existing != tag);

        if own.len() == before {
            return Ok(false);
        }

        if own.is_empty() {
            let key: Vec<u8> = PathKey::new(&path).try_into()?;
            self.files.remove(key)?;
        } else {
            self.store_tags(&path, &own)?;
        }
        self.remove_from_tag_index(&PathString::new(&path)?, tag)?;
        Ok(true)
    }

    /// Tags assigned directly to `path`, sorted
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn own_tags<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>, DbError> {
        self.stored_tags(&normalize_path(path.as_ref()))
    }

    /// Union of the own tags of every ancestor directory, sorted and deduplicated
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn inherited_tags<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>, DbError> {
        let path = normalize_path(path.as_ref());
        let mut inherited = BTreeSet::new();

        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            inherited.extend(self.stored_tags(ancestor)?);
        }

        Ok(inherited.into_iter().collect())
    }

    /// Paths carrying `tag` as an own tag (via the reverse index)
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn files_with_tag(&self, tag: &str) -> Result<Vec<PathBuf>, DbError> {
        match self.tags.get(tag.as_bytes())? {
            Some(value) => {
                let (files, _): (Vec<String>, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(files.into_iter().map(PathBuf::from).collect())
            }
            None => Ok(Vec::new()),
        }
    }

    /// All tags in use, sorted
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration fails or a key is not valid UTF-8.
    pub fn list_tags(&self) -> Result<Vec<String>, DbError> {
        let mut tags = Vec::new();
        for key in self.tags.iter().keys() {
            let key = key?;
            let tag = String::from_utf8(key.to_vec())
                .map_err(|e| DbError::SerializeError(e.to_string()))?;
            tags.push(tag);
        }
        Ok(tags)
    }

    /// Number of paths with at least one own tag
    #[must_use]
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if flushing fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Remove every record
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing either tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.files.clear()?;
        self.tags.clear()?;
        Ok(())
    }

    fn stored_tags(&self, path: &Path) -> Result<Vec<String>, DbError> {
        let key: Vec<u8> = PathKey::new(path).try_into()?;

        match self.files.get(key.as_slice())? {
            Some(value) => {
                let (tags, _): (Vec<String>, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(tags)
            }
            None => Ok(Vec::new()),
        }
    }

    fn store_tags(&self, path: &Path, tags: &[String]) -> Result<(), DbError> {
        let key: Vec<u8> = PathKey::new(path).try_into()?;
        let value = bincode::encode_to_vec(tags, bincode::config::standard())?;
        self.files.insert(key, value)?;
        Ok(())
    }

    fn remove_from_tag_index(&self, file_path: &str, tag: &str) -> Result<(), DbError> {
        let tag_key = tag.as_bytes();

        if let Some(value) = self.tags.get(tag_key)? {
            let (mut files, _): (Vec<String>, usize) =
                bincode::decode_from_slice(&value, bincode::config::standard())?;

            files.retain(|f| f != file_path);

            if files.is_empty() {
                self.tags.remove(tag_key)?;
            } else {
                let encoded = bincode::encode_to_vec(&files, bincode::config::standard())?;
                self.tags.insert(tag_key, encoded)?;
            }
        }
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Best-effort flush; callers needing durability call flush()
        let _ = self.db.flush();
    }
}

impl TagLookup for Database {
    fn own_tags(&self, path: &Path) -> Result<Vec<String>, DbError> {
        Self::own_tags(self, path)
    }

    fn inherited_tags(&self, path: &Path) -> Result<Vec<String>, DbError> {
        Self::inherited_tags(self, path)
    }
}

fn decode_list(bytes: &[u8]) -> Result<Vec<String>, DbError> {
    let (list, _): (Vec<String>, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(list)
}

fn encode_list(list: &[String]) -> Result<Vec<u8>, DbError> {
    Ok(bincode::encode_to_vec(list, bincode::config::standard())?)
}

/// Canonical form of `path`, or `path` itself when it cannot be resolved
fn normalize_path(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(err) => {
            warn!(path = %path.display(), "failed to canonicalize path; using as provided: {err}");
            path.to_path_buf()
        }
    }
}
