//! Where clauses: ordered conjunctions of landmark conditions.

use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use super::check::Check;
use crate::template::{Template, TemplateError};

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// One `<check> <relative-pattern>` test of a where clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkCondition {
    check: Check,
    relative: Template,
}

impl LandmarkCondition {
    /// Creates a condition.
    #[must_use]
    pub fn new(check: Check, relative: impl Into<Template>) -> Self {
        Self {
            check,
            relative: relative.into(),
        }
    }

    /// Returns the predicate of this condition.
    #[must_use]
    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Returns the relative pattern, unrendered.
    #[must_use]
    pub fn relative(&self) -> &Template {
        &self.relative
    }

    /// Returns the candidates satisfying this condition, in lexical order.
    ///
    /// `matched[0]` is the anchor; later elements are the candidates bound by
    /// the preceding conditions and are available to the pattern as `{1}`,
    /// `{2}`, and so on. Substituted values are matched literally.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the pattern cannot be rendered with
    /// the bound matches.
    pub fn matching(&self, matched: &[PathBuf]) -> Result<Vec<PathBuf>, TemplateError> {
        let args: Vec<String> = matched
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let relative = collapse_stars(&self.relative.render_with(&args, Pattern::escape)?);
        let anchor = args.first().map_or_else(|| "/".to_string(), |a| Pattern::escape(a));
        let pattern = Path::new(&anchor).join(relative);
        let pattern = pattern.to_string_lossy();

        let entries = match glob::glob_with(&pattern, GLOB_OPTIONS) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("invalid glob pattern {pattern:?}: {e}");
                return Ok(Vec::new());
            }
        };

        Ok(entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::debug!("skipping unreadable glob entry: {e}");
                    None
                }
            })
            .filter(|candidate| self.check.test(candidate))
            .collect())
    }
}

/// Folds each run of `*` into one, so `**` never spans directories.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c != '*' || !out.ends_with('*') {
            out.push(c);
        }
    }
    out
}

/// An ordered conjunction of [`LandmarkCondition`]s.
///
/// # Examples
///
/// ```
/// use contextual::landmark::{CheckRegistry, LandmarkClause};
///
/// let project = tempfile::tempdir().unwrap();
/// std::fs::create_dir_all(project.path().join(".git/refs")).unwrap();
///
/// let dir = CheckRegistry::builtin().get("-d").unwrap().clone();
/// let mut clause = LandmarkClause::new();
/// clause.push_cond(dir.clone(), ".git");
/// clause.push_cond(dir, "{1}/refs");
///
/// let matched = clause.test(project.path()).unwrap().unwrap();
/// assert_eq!(matched[0], project.path());
/// assert_eq!(matched[2], project.path().join(".git/refs"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkClause {
    conditions: Vec<LandmarkCondition>,
}

impl LandmarkClause {
    /// Creates an empty clause, which is satisfied by any anchor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a condition.
    pub fn push_cond(&mut self, check: Check, relative: impl Into<Template>) {
        self.conditions.push(LandmarkCondition::new(check, relative));
    }

    /// Returns the conditions in order.
    #[must_use]
    pub fn conditions(&self) -> &[LandmarkCondition] {
        &self.conditions
    }

    /// Tests the clause at `anchor`.
    ///
    /// Searches depth first for the first assignment of candidates, one per
    /// condition, that satisfies every condition. Candidates of a condition
    /// are tried in lexical order; when a candidate leads nowhere the next
    /// one is tried.
    ///
    /// Returns `[anchor, match1, match2, ...]` on success and `None` when no
    /// assignment exists.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if a condition pattern references a
    /// placeholder that is not bound when it is evaluated.
    pub fn test(&self, anchor: &Path) -> Result<Option<Vec<PathBuf>>, TemplateError> {
        let mut matched = vec![anchor.to_path_buf()];
        let Some(first) = self.conditions.first() else {
            return Ok(Some(matched));
        };

        // frames[i] holds the untried candidates of condition i; while frame
        // i is on top, matched holds the anchor plus one binding per frame
        // below it.
        let mut frames = vec![first.matching(&matched)?.into_iter()];
        while let Some(frame) = frames.last_mut() {
            let Some(candidate) = frame.next() else {
                frames.pop();
                continue;
            };
            matched.truncate(frames.len());
            matched.push(candidate);
            if frames.len() == self.conditions.len() {
                return Ok(Some(matched));
            }
            let next = self.conditions[frames.len()].matching(&matched)?;
            frames.push(next.into_iter());
        }

        Ok(None)
    }
}

impl fmt::Display for LandmarkClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("where")?;
        for cond in &self.conditions {
            write!(
                f,
                " {} {}",
                cond.check.token(),
                shell_words::quote(cond.relative.as_str())
            )?;
        }
        Ok(())
    }
}
