//! Error types for the contextual library.
//!
//! This module provides the error hierarchy for rule parsing, landmark
//! matching and context rendering, using `thiserror` for ergonomic error
//! handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::inference::Location;
use crate::template::TemplateError;

/// Result type alias for operations that may fail with a contextual error.
///
/// # Examples
///
/// ```
/// use contextual::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the contextual library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The rules file could not be read.
    #[error("cannot read rules from {}: {source}", path.display())]
    ReadRules {
        /// The rules file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A rule line could not be parsed.
    #[error("invalid rule: {line}: {reason}")]
    InvalidRule {
        /// The offending rule line.
        line: String,
        /// The reason the line was rejected.
        reason: String,
    },

    /// A recursive wildcard rule without a where clause would match every
    /// ancestor of every path.
    #[error("too unconstrained: {line}")]
    TooUnconstrained {
        /// The offending rule line.
        line: String,
    },

    /// A template attached to a rule could not be rendered.
    #[error("[rule: {rule}] {source}")]
    Rule {
        /// The source text of the rule.
        rule: String,
        /// The underlying template failure.
        #[source]
        source: TemplateError,
    },

    /// A context template could not be rendered at output time.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// No rule matched at any of the attempted locations.
    #[error("failed to infer context: {}", format_locations(.locations))]
    NoContext {
        /// The locations that were attempted, in priority order.
        locations: Vec<Location>,
    },

    /// No rule resolved the requested shortcut.
    #[error("failed to resolve shortcut: {name}")]
    NoShortcut {
        /// The shortcut name.
        name: String,
    },
}

fn format_locations(locations: &[Location]) -> String {
    let parts: Vec<String> = locations.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

impl Error {
    /// Check if error is a configuration problem with a single rule line.
    ///
    /// # Examples
    ///
    /// ```
    /// use contextual::Error;
    ///
    /// let err = Error::TooUnconstrained { line: "/home/** := x".to_string() };
    /// assert!(err.is_rule_config());
    /// ```
    #[must_use]
    pub fn is_rule_config(&self) -> bool {
        matches!(self, Self::InvalidRule { .. } | Self::TooUnconstrained { .. })
    }

    /// Check if error indicates nothing could be inferred.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoContext { .. } | Self::NoShortcut { .. })
    }
}
