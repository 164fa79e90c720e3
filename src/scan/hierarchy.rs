//! Root-to-node path segments
//!
//! The first segment carries the root marker (`/` on Unix, `C:\` on
//! Windows) so that joining any prefix of the hierarchy yields a valid
//! ancestor path.

use std::path::{Component, MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

/// Split `path` into the segments walked from the filesystem root
#[must_use]
pub fn collect_path_hierarchy(path: &Path) -> Vec<String> {
    let mut segments = Vec::new();
    let mut pending_prefix: Option<String> = None;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                pending_prefix = Some(prefix.as_os_str().to_string_lossy().into_owned());
            }
            Component::RootDir => match pending_prefix.take() {
                Some(prefix) => segments.push(format!("{prefix}{MAIN_SEPARATOR}")),
                None => segments.push(MAIN_SEPARATOR_STR.to_string()),
            },
            Component::Normal(name) => {
                if let Some(prefix) = pending_prefix.take() {
                    segments.push(prefix);
                }
                segments.push(name.to_string_lossy().into_owned());
            }
            Component::CurDir => {}
            Component::ParentDir => segments.push(String::from("..")),
        }
    }

    if let Some(prefix) = pending_prefix.take() {
        segments.push(prefix);
    }

    segments
}

/// Parent directory derived from a hierarchy, `None` at the root
#[must_use]
pub fn parent_from_hierarchy(hierarchy: &[String]) -> Option<PathBuf> {
    if hierarchy.len() < 2 {
        return None;
    }

    let parent: PathBuf = hierarchy[..hierarchy.len() - 1].iter().collect();
    Some(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_unix_hierarchy() {
        let segments = collect_path_hierarchy(Path::new("/home/user/docs"));
        assert_eq!(segments, vec!["/", "home", "user", "docs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_root_hierarchy() {
        assert_eq!(collect_path_hierarchy(Path::new("/")), vec!["/"]);
    }

    #[test]
    fn test_relative_hierarchy_skips_current_dir() {
        let segments = collect_path_hierarchy(Path::new("./a/../b"));
        assert_eq!(segments, vec!["a", "..", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_from_hierarchy() {
        let segments = collect_path_hierarchy(Path::new("/home/user/docs"));
        assert_eq!(
            parent_from_hierarchy(&segments),
            Some(PathBuf::from("/home/user"))
        );

        let top = collect_path_hierarchy(Path::new("/home"));
        assert_eq!(parent_from_hierarchy(&top), Some(PathBuf::from("/")));
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_of_root_is_none() {
        assert_eq!(parent_from_hierarchy(&["/".to_string()]), None);
        assert_eq!(parent_from_hierarchy(&[]), None);
    }
}
