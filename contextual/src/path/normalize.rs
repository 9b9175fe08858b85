//! Path normalization functions.
//!
//! This module provides functionality to normalize paths by:
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths against a base
//! - Resolving `.` and `..` components lexically, without following symlinks

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use contextual::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/projects")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("projects"));
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in an absolute path.
///
/// A `..` at the root stays at the root, as it does on the filesystem.
///
/// # Examples
///
/// ```
/// use contextual::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../../c")), PathBuf::from("/c"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => result.push(component),
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
        }
    }

    result
}

/// Make `path` absolute against `base`, resolving `.` and `..` lexically.
///
/// Symlinks are not followed: `/link/..` is the directory containing
/// `/link`, whatever the link points at.
///
/// # Examples
///
/// ```
/// use contextual::path::normalize::absolutize;
/// use std::path::{Path, PathBuf};
///
/// let abs = absolutize(Path::new("../bin/tool"), Path::new("/work/proj/src"));
/// assert_eq!(abs, PathBuf::from("/work/proj/bin/tool"));
///
/// let abs = absolutize(Path::new("/usr/bin/env"), Path::new("/work"));
/// assert_eq!(abs, PathBuf::from("/usr/bin/env"));
/// ```
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        resolve_components(path)
    } else {
        resolve_components(&base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_home() {
        let home = home::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
    }

    #[test]
    fn test_expand_tilde_with_path() {
        let home = home::home_dir().unwrap();
        let expanded = expand_tilde(Path::new("~/test/**")).unwrap();
        assert_eq!(expanded, home.join("test/**"));
    }

    #[test]
    fn test_expand_tilde_absolute_unchanged() {
        let path = Path::new("/absolute/path");
        assert_eq!(expand_tilde(path).unwrap(), path);
    }

    #[test]
    fn test_expand_tilde_user_syntax_not_supported() {
        assert!(expand_tilde(Path::new("~user/path")).is_err());
    }

    #[test]
    fn test_resolve_components_simple() {
        assert_eq!(
            resolve_components(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
    }

    #[test]
    fn test_resolve_components_root_only() {
        assert_eq!(resolve_components(Path::new("/")), PathBuf::from("/"));
        assert_eq!(resolve_components(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_absolutize_relative() {
        assert_eq!(
            absolutize(Path::new("./bin/tool"), Path::new("/work")),
            PathBuf::from("/work/bin/tool")
        );
    }

    #[test]
    fn test_absolutize_escapes_to_root() {
        assert_eq!(
            absolutize(Path::new("../../../x"), Path::new("/a")),
            PathBuf::from("/x")
        );
    }

    #[cfg(feature = "property-tests")]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_with_dots_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just(".".to_string()),
                    Just("..".to_string()),
                    "[a-zA-Z0-9_-]{1,10}".prop_map(|s| s),
                ],
                1..=8,
            )
            .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// Resolution is idempotent
            #[test]
            fn resolve_idempotent(s in path_with_dots_strategy()) {
                let once = resolve_components(Path::new(&s));
                prop_assert_eq!(resolve_components(&once), once.clone());
            }

            /// Resolved paths are absolute and have no . or .. components
            #[test]
            fn resolve_no_dot_components(s in path_with_dots_strategy()) {
                let resolved = resolve_components(Path::new(&s));
                prop_assert!(resolved.is_absolute());
                for component in resolved.components() {
                    prop_assert_ne!(component, Component::CurDir);
                    prop_assert_ne!(component, Component::ParentDir);
                }
            }
        }
    }
}
