//! Candidate start locations for inference.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::path::normalize::absolutize;

/// Where a candidate location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Directory of a command invoked by path.
    AbsCmd,
    /// Working directory as reported by the `PWD` environment variable.
    Pwd,
    /// Working directory as reported by the operating system.
    Getcwd,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbsCmd => write!(f, "abscmd"),
            Self::Pwd => write!(f, "PWD"),
            Self::Getcwd => write!(f, "getcwd"),
        }
    }
}

/// A directory to match landmarks against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Where the location came from.
    pub kind: LocationKind,
    /// The absolute directory.
    pub dir: PathBuf,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(kind: LocationKind, dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            dir: dir.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.dir.display())
    }
}

/// Collects the candidate locations for `command` in priority order.
///
/// 1. `abscmd`: the directory of `command`, when it contains a `/`; relative
///    commands are taken relative to `cwd` and `.`/`..` are resolved without
///    following symlinks
/// 2. `PWD`: `pwd`, when it is an absolute path
/// 3. `getcwd`: `cwd`
///
/// # Examples
///
/// ```
/// use contextual::inference::{collect_locations, LocationKind};
/// use std::path::Path;
///
/// let locations = collect_locations("../bin/tool", Some(Path::new("/w/link")), Path::new("/w/real"));
/// let dirs: Vec<_> = locations.iter().map(|l| (l.kind, l.dir.to_str().unwrap())).collect();
/// assert_eq!(dirs, vec![
///     (LocationKind::AbsCmd, "/w/bin"),
///     (LocationKind::Pwd, "/w/link"),
///     (LocationKind::Getcwd, "/w/real"),
/// ]);
///
/// let locations = collect_locations("make", None, Path::new("/w"));
/// assert_eq!(locations.len(), 1);
/// ```
#[must_use]
pub fn collect_locations(command: &str, pwd: Option<&Path>, cwd: &Path) -> Vec<Location> {
    let mut locations = Vec::with_capacity(3);

    if command.contains('/') {
        let absolute = absolutize(Path::new(command), cwd);
        let dir = absolute.parent().unwrap_or_else(|| Path::new("/"));
        locations.push(Location::new(LocationKind::AbsCmd, dir));
    }

    match pwd {
        Some(pwd) if pwd.is_absolute() => locations.push(Location::new(LocationKind::Pwd, pwd)),
        Some(pwd) => log::debug!("ignoring non-absolute PWD {}", pwd.display()),
        None => {}
    }

    locations.push(Location::new(LocationKind::Getcwd, cwd));
    locations
}
