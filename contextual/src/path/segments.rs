//! Path segmentation.
//!
//! Landmark matching works on the ordered components of an absolute path.
//! Segmentation is purely textual: `.` and `..` are kept as they are, so
//! callers supply paths that are already absolute and resolved.

use std::path::{Path, PathBuf};

/// Splits an absolute path into its components.
///
/// The root maps to the empty sequence. Empty components produced by
/// repeated or trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use contextual::path::segs;
/// use std::path::Path;
///
/// assert_eq!(segs(Path::new("/home/user0/foo")), vec!["home", "user0", "foo"]);
/// assert!(segs(Path::new("/")).is_empty());
/// ```
#[must_use]
pub fn segs(path: &Path) -> Vec<String> {
    path.to_string_lossy()
        .split('/')
        .filter(|seg| !seg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rebuilds the absolute path made of `segments` below the root.
///
/// # Examples
///
/// ```
/// use contextual::path::join_segs;
/// use std::path::PathBuf;
///
/// let segments = vec!["home".to_string(), "user0".to_string()];
/// assert_eq!(join_segs(&segments), PathBuf::from("/home/user0"));
/// assert_eq!(join_segs(&[]), PathBuf::from("/"));
/// ```
#[must_use]
pub fn join_segs(segments: &[String]) -> PathBuf {
    let mut path = PathBuf::from("/");
    path.extend(segments);
    path
}
