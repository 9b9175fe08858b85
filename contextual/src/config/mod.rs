//! Landmark rule configuration.
//!
//! A configuration file holds one rule per line; see [`parse_line`] for the
//! syntax. Parsing never stops at a bad line: the line is recorded as a
//! [`SkippedRule`] and the remaining lines are parsed.
//!
//! # Examples
//!
//! ```
//! use contextual::config::RuleSet;
//!
//! let rules = RuleSet::parse(
//!     "# projects\n\
//!      ~/src/* where -d .git := PROJECT={0}\n\
//!      /opt/** := broken\n",
//! );
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules.skipped().len(), 1);
//! assert_eq!(rules.skipped()[0].line_number, 3);
//! ```

mod loader;
mod parser;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;

use crate::error::Error;
use crate::landmark::{CheckRegistry, Landmark};

pub use parser::parse_line;

/// A configuration line that was not turned into a rule.
#[derive(Debug)]
pub struct SkippedRule {
    /// One-based line number in the configuration text.
    pub line_number: usize,
    /// Why the line was skipped.
    pub error: Error,
}

impl fmt::Display for SkippedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// The ordered landmark rules of a configuration.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Landmark>,
    skipped: Vec<SkippedRule>,
}

impl RuleSet {
    /// Parses configuration text with the built-in checks.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, CheckRegistry::builtin())
    }

    /// Parses configuration text with the checks of `registry`.
    #[must_use]
    pub fn parse_with(text: &str, registry: &CheckRegistry) -> Self {
        Self::parse_lines(text.lines(), registry)
    }

    /// Parses configuration lines with the checks of `registry`.
    pub fn parse_lines<I, S>(lines: I, registry: &CheckRegistry) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for (index, line) in lines.into_iter().enumerate() {
            match parse_line(line.as_ref(), registry) {
                Ok(Some(rule)) => set.rules.push(rule),
                Ok(None) => {}
                Err(error) => {
                    log::debug!("skipping rule on line {}: {error}", index + 1);
                    set.skipped.push(SkippedRule {
                        line_number: index + 1,
                        error,
                    });
                }
            }
        }
        set
    }

    /// Returns the rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Landmark] {
        &self.rules
    }

    /// Returns the lines that were skipped.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Landmark> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Landmark>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
            skipped: Vec::new(),
        }
    }
}
