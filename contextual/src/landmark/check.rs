//! Named filesystem predicates used in where clauses.
//!
//! A [`CheckRegistry`] maps a short token such as `-d` to a predicate over a
//! single path. The built-in registry is created once per process; callers
//! that need more tokens build their own registry on top of it and hand it
//! to the parser.
//!
//! Predicates never fail: a path that cannot be inspected (missing,
//! permission denied) simply does not satisfy the check.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// A predicate over a filesystem path.
pub type CheckFn = fn(&Path) -> bool;

/// A predicate registered under a token.
#[derive(Clone)]
pub struct Check {
    token: String,
    test: CheckFn,
}

impl Check {
    /// Creates a check.
    #[must_use]
    pub fn new(token: impl Into<String>, test: CheckFn) -> Self {
        Self {
            token: token.into(),
            test,
        }
    }

    /// Returns the token this check is registered under.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Tests `path`.
    #[must_use]
    pub fn test(&self, path: &Path) -> bool {
        (self.test)(path)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Check").field(&self.token).finish()
    }
}

impl PartialEq for Check {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for Check {}

/// `-d`: path is a directory.
#[must_use]
pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// `-e`: path exists.
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// `-f`: path is a regular file.
#[must_use]
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// `-s`: path is a regular file with a non-zero size.
#[must_use]
pub fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}

/// `-x`: the current user may execute the path (or search it, for directories).
#[cfg(unix)]
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};

    access(path, AccessFlags::X_OK).is_ok()
}

/// `-x`: path exists; there are no permission bits to inspect.
#[cfg(not(unix))]
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    path.exists()
}

/// Registry mapping tokens to checks.
///
/// # Examples
///
/// ```
/// use contextual::landmark::CheckRegistry;
/// use std::path::Path;
///
/// let registry = CheckRegistry::with_builtins()
///     .with("-L", |p: &Path| p.is_symlink());
/// assert!(registry.get("-d").is_some());
/// assert!(registry.get("-L").is_some());
/// assert!(CheckRegistry::builtin().get("-L").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    checks: HashMap<String, Check>,
}

impl CheckRegistry {
    /// Creates a registry without any checks.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in checks
    /// `-d`, `-e`, `-f`, `-s` and `-x`.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::empty()
            .with("-d", is_dir)
            .with("-e", exists)
            .with("-f", is_file)
            .with("-s", is_non_empty_file)
            .with("-x", is_executable)
    }

    /// Returns the process-wide built-in registry.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<CheckRegistry> = OnceLock::new();
        BUILTIN.get_or_init(Self::with_builtins)
    }

    /// Registers `test` under `token`, returning the check it replaces.
    pub fn register(&mut self, token: impl Into<String>, test: CheckFn) -> Option<Check> {
        let check = Check::new(token, test);
        self.checks.insert(check.token.clone(), check)
    }

    /// Builder form of [`CheckRegistry::register`].
    #[must_use]
    pub fn with(mut self, token: impl Into<String>, test: CheckFn) -> Self {
        self.register(token, test);
        self
    }

    /// Looks up the check registered under `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Check> {
        self.checks.get(token)
    }

    /// Returns the registered tokens, sorted.
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}
