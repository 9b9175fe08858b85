//! Directory landmarks and their matching.
//!
//! A [`Landmark`] binds a path prefix, a wildcard mode and an optional
//! [`LandmarkClause`] to a context [`Template`]. Matching a location yields
//! the [`MatchedPaths`] the template is later rendered with.
//!
//! # Anchor selection
//!
//! | Wildcard | Candidate anchors |
//! |---|---|
//! | [`Wildcard::Exact`] | the prefix itself |
//! | [`Wildcard::One`] | the prefix plus the next location segment |
//! | [`Wildcard::Recursive`] | every ancestor of the location down to the prefix, deepest first |
//!
//! The clause is tested at each candidate in turn and the first success wins,
//! so the landmark closest to the location is preferred.

mod check;
mod clause;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::{join_segs, segs};
use crate::template::Template;

pub use check::{
    exists, is_dir, is_executable, is_file, is_non_empty_file, Check, CheckFn, CheckRegistry,
};
pub use clause::{LandmarkClause, LandmarkCondition};

/// How many levels below the prefix a landmark anchor may sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    /// The anchor is the prefix itself.
    Exact,
    /// The anchor is exactly one level below the prefix (`/*`).
    One,
    /// The anchor is any level at or below the prefix (`/**`).
    Recursive,
}

impl Wildcard {
    /// Returns the pattern suffix selecting this mode.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Exact => "",
            Self::One => "/*",
            Self::Recursive => "/**",
        }
    }
}

/// The paths matched by a landmark: the anchor followed by one path per
/// clause condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPaths(Vec<PathBuf>);

impl MatchedPaths {
    /// Returns the matched anchor directory.
    #[must_use]
    pub fn anchor(&self) -> &Path {
        &self.0[0]
    }

    /// Returns all matched paths, anchor first.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// Returns the matched paths as template arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    /// Renders `template` with these paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the template references an unbound
    /// placeholder or is malformed.
    pub fn render(&self, template: &Template) -> Result<String> {
        Ok(template.render(&self.to_args())?)
    }
}

impl fmt::Display for MatchedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_args())
    }
}

/// A directory landmark rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmark {
    prefix: Vec<String>,
    wildcard: Wildcard,
    clause: Option<LandmarkClause>,
    context: Template,
    source: String,
}

impl Landmark {
    /// Creates a landmark.
    ///
    /// A `None` prefix makes the landmark unanchored: it may match at any
    /// ancestor of a location, which forces [`Wildcard::Recursive`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooUnconstrained`] for a recursive landmark without a
    /// clause, which would match every ancestor of every location.
    ///
    /// # Examples
    ///
    /// ```
    /// use contextual::landmark::{Landmark, Wildcard};
    /// use std::path::Path;
    ///
    /// let rule = Landmark::new(Some(Path::new("/srv")), Wildcard::One, None, "SITE={0}").unwrap();
    /// assert_eq!(rule.to_string(), "/srv/* := SITE={0}");
    ///
    /// assert!(Landmark::new(Some(Path::new("/srv")), Wildcard::Recursive, None, "x").is_err());
    /// ```
    pub fn new(
        prefix: Option<&Path>,
        wildcard: Wildcard,
        clause: Option<LandmarkClause>,
        context: impl Into<Template>,
    ) -> Result<Self> {
        let (prefix, wildcard) = match prefix {
            Some(p) => (segs(p), wildcard),
            None => (Vec::new(), Wildcard::Recursive),
        };
        let context = context.into();
        let source = describe(&prefix, wildcard, clause.as_ref(), &context);
        if clause.is_none() && wildcard == Wildcard::Recursive {
            return Err(Error::TooUnconstrained { line: source });
        }
        Ok(Self {
            prefix,
            wildcard,
            clause,
            context,
            source,
        })
    }

    /// Replaces the source text used in diagnostics.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Returns the prefix segments.
    #[must_use]
    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// Returns the wildcard mode.
    #[must_use]
    pub fn wildcard(&self) -> Wildcard {
        self.wildcard
    }

    /// Returns the where clause, if any.
    #[must_use]
    pub fn clause(&self) -> Option<&LandmarkClause> {
        self.clause.as_ref()
    }

    /// Returns the context template.
    #[must_use]
    pub fn context(&self) -> &Template {
        &self.context
    }

    /// Returns the rule text this landmark was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if a match contributes no context.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.context.is_empty()
    }

    /// Matches the landmark against a location given as its segments.
    ///
    /// Returns the matched paths of the deepest satisfying anchor, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rule`] if a clause condition references an unbound
    /// placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use contextual::landmark::{Landmark, Wildcard};
    /// use contextual::path::segs;
    /// use std::path::Path;
    ///
    /// let rule = Landmark::new(Some(Path::new("/home")), Wildcard::One, None, "U={0}").unwrap();
    /// let matched = rule.match_path(&segs(Path::new("/home/user0/src"))).unwrap().unwrap();
    /// assert_eq!(matched.anchor(), Path::new("/home/user0"));
    ///
    /// assert!(rule.match_path(&segs(Path::new("/home"))).unwrap().is_none());
    /// ```
    pub fn match_path(&self, location: &[String]) -> Result<Option<MatchedPaths>> {
        if !location.starts_with(&self.prefix) {
            return Ok(None);
        }
        let n = self.prefix.len();
        let (shallowest, deepest) = match self.wildcard {
            Wildcard::Exact => (n, n),
            Wildcard::One => (n + 1, n + 1),
            Wildcard::Recursive => (n, location.len()),
        };
        if deepest > location.len() {
            return Ok(None);
        }

        for depth in (shallowest..=deepest).rev() {
            let anchor = join_segs(&location[..depth]);
            if let Some(matched) = self.test_clause(&anchor)? {
                return Ok(Some(matched));
            }
        }
        Ok(None)
    }

    /// Resolves a shortcut name without walking a location.
    ///
    /// For wildcard landmarks the candidate is the directory `name` directly
    /// below the prefix, which must exist. For exact landmarks `name` must
    /// equal the trailing segments of the prefix and the candidate is the
    /// prefix itself. The clause is tested at the candidate either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rule`] if a clause condition references an unbound
    /// placeholder.
    pub fn match_shortcut(&self, name: &str) -> Result<Option<MatchedPaths>> {
        let name_segs = segs(Path::new(name));
        if name_segs.is_empty() {
            return Ok(None);
        }
        let candidate = if self.wildcard == Wildcard::Exact {
            if !self.prefix.ends_with(&name_segs) {
                return Ok(None);
            }
            join_segs(&self.prefix)
        } else {
            if Path::new(name).is_absolute() {
                return Ok(None);
            }
            let candidate = join_segs(&self.prefix).join(name);
            if !candidate.is_dir() {
                return Ok(None);
            }
            candidate
        };
        self.test_clause(&candidate)
    }

    fn test_clause(&self, anchor: &Path) -> Result<Option<MatchedPaths>> {
        let Some(clause) = &self.clause else {
            return Ok(Some(MatchedPaths(vec![anchor.to_path_buf()])));
        };
        clause
            .test(anchor)
            .map(|matched| matched.map(MatchedPaths))
            .map_err(|source| Error::Rule {
                rule: self.source.clone(),
                source,
            })
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn describe(
    prefix: &[String],
    wildcard: Wildcard,
    clause: Option<&LandmarkClause>,
    context: &Template,
) -> String {
    let unanchored = prefix.is_empty() && wildcard == Wildcard::Recursive && clause.is_some();
    let mut parts = Vec::new();
    if !unanchored {
        let root = join_segs(prefix);
        let root = root.to_string_lossy();
        if root == "/" && wildcard != Wildcard::Exact {
            parts.push(wildcard.suffix().to_string());
        } else {
            parts.push(format!("{}{}", shell_words::quote(&root), wildcard.suffix()));
        }
    }
    if let Some(clause) = clause {
        parts.push(clause.to_string());
    }
    parts.push(":=".to_string());
    if !context.is_empty() {
        parts.push(context.to_string());
    }
    parts.join(" ")
}
