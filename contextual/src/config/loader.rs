//! Configuration file loading.

use std::fs;
use std::path::Path;

use super::RuleSet;
use crate::error::{Error, Result};
use crate::landmark::CheckRegistry;
use crate::path::normalize::expand_tilde;

impl RuleSet {
    /// Reads and parses the configuration file at `path` with the built-in
    /// checks. A leading `~` in `path` is expanded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadRules`] if the file cannot be read. Bad lines are
    /// not errors; they are reported through [`RuleSet::skipped`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use contextual::config::RuleSet;
    /// use std::path::Path;
    ///
    /// let rules = RuleSet::load(Path::new("~/.contextual")).unwrap();
    /// println!("{} rules", rules.len());
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, CheckRegistry::builtin())
    }

    /// Reads and parses the configuration file at `path` with the checks of
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadRules`] if the file cannot be read.
    pub fn load_with(path: &Path, registry: &CheckRegistry) -> Result<Self> {
        let path = expand_tilde(path)?;
        let text = fs::read_to_string(&path).map_err(|source| Error::ReadRules {
            path: path.clone(),
            source,
        })?;
        Ok(Self::parse_with(&text, registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("ctx.conf");
        fs::write(&conf, "/a := A\n/b/** := B\n").unwrap();

        let rules = RuleSet::load(&conf).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.skipped().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RuleSet::load(&dir.path().join("missing.conf")).unwrap_err();
        assert!(matches!(err, Error::ReadRules { .. }));
        assert!(err.to_string().contains("missing.conf"));
    }
}
