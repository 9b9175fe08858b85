//! Context inference across candidate locations.
//!
//! [`ContextInferencer`] matches the rules of a [`RuleSet`] against each
//! [`Location`] in priority order. Every rule is consumed the first time it
//! is tried, whatever the outcome, so no rule is evaluated twice and rules
//! declared for a more specific location cannot fire again further out.
//!
//! # Examples
//!
//! ```
//! use contextual::config::RuleSet;
//! use contextual::inference::{ContextInferencer, Location, LocationKind};
//!
//! let rules = RuleSet::parse("/srv/* := SITE={0}\n/ := ANY=1\n");
//! let locations = [Location::new(LocationKind::Getcwd, "/srv/www/static")];
//! let pairs = ContextInferencer::new(&rules).infer(&locations);
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(pairs[0].matched().unwrap().anchor().to_str(), Some("/srv/www"));
//! ```

mod location;

use crate::config::RuleSet;
use crate::error::Result;
use crate::landmark::{Landmark, MatchedPaths};
use crate::logging::Logger;
use crate::path::segs;
use crate::template::Template;

pub use location::{collect_locations, Location, LocationKind};

/// When a rule leaves the pool of rules still to be tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consumption {
    /// A rule is consumed by the first location it is tried against.
    #[default]
    OnAttempt,
    /// A rule is consumed only when it matches; rules that did not match
    /// are tried again at the next location.
    OnMatch,
}

/// The outcome of a rule that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextPair<'r> {
    /// The rule matched and contributes its context.
    Context {
        /// The matching rule.
        rule: &'r Landmark,
        /// The paths the rule matched.
        matched: MatchedPaths,
    },
    /// The rule matched but has an empty context.
    Void {
        /// The matching rule.
        rule: &'r Landmark,
    },
}

impl<'r> ContextPair<'r> {
    /// Returns the matching rule.
    #[must_use]
    pub fn rule(&self) -> &'r Landmark {
        match self {
            Self::Context { rule, .. } | Self::Void { rule } => rule,
        }
    }

    /// Returns the matched paths, or `None` for a void match.
    #[must_use]
    pub fn matched(&self) -> Option<&MatchedPaths> {
        match self {
            Self::Context { matched, .. } => Some(matched),
            Self::Void { .. } => None,
        }
    }

    /// Returns the context template, or `None` for a void match.
    #[must_use]
    pub fn template(&self) -> Option<&'r Template> {
        match self {
            Self::Context { rule, .. } => Some(rule.context()),
            Self::Void { .. } => None,
        }
    }

    /// Returns true for a void match.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void { .. })
    }
}

/// Drives one matching pass of a rule set.
#[derive(Debug, Clone)]
pub struct ContextInferencer<'r> {
    rules: &'r RuleSet,
    consumption: Consumption,
    logger: Logger,
}

impl<'r> ContextInferencer<'r> {
    /// Creates an inferencer over `rules` with the default consumption
    /// policy and a [`Logger`] at the normal level.
    #[must_use]
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            consumption: Consumption::default(),
            logger: Logger::default(),
        }
    }

    /// Sets the consumption policy.
    #[must_use]
    pub fn with_consumption(mut self, consumption: Consumption) -> Self {
        self.consumption = consumption;
        self
    }

    /// Sets the logger used for warnings and the matching trace.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Matches the rules against `locations`, tried in order.
    ///
    /// Returns the matches in the order they were found: by location, then
    /// by rule declaration. A rule whose clause cannot be evaluated is
    /// reported as a warning and counts as not matching.
    pub fn infer(&self, locations: &[Location]) -> Vec<ContextPair<'r>> {
        let mut pairs = Vec::new();
        let mut unmatched: Vec<&'r Landmark> = self.rules.iter().collect();

        for location in locations {
            self.logger.trace(&format!(
                "start-dir[{}]: {}",
                location.kind,
                location.dir.display()
            ));
            if unmatched.is_empty() {
                continue;
            }
            let segments = segs(&location.dir);
            unmatched.retain(|&rule| {
                let matched = self.record(rule, rule.match_path(&segments), &mut pairs);
                !matched && self.consumption == Consumption::OnMatch
            });
        }

        pairs
    }

    /// Resolves the shortcut `name` against every rule.
    pub fn infer_shortcut(&self, name: &str) -> Vec<ContextPair<'r>> {
        self.logger.trace(&format!("shortcut: {name}"));
        let mut pairs = Vec::new();
        for rule in self.rules {
            self.record(rule, rule.match_shortcut(name), &mut pairs);
        }
        pairs
    }

    fn record(
        &self,
        rule: &'r Landmark,
        outcome: Result<Option<MatchedPaths>>,
        pairs: &mut Vec<ContextPair<'r>>,
    ) -> bool {
        match outcome {
            Ok(Some(_)) if rule.is_void() => {
                self.logger.trace(&format!(" ~~ {rule} => void_context"));
                pairs.push(ContextPair::Void { rule });
                true
            }
            Ok(Some(matched)) => {
                self.logger.trace(&format!(" ~~ {rule} => {matched}"));
                pairs.push(ContextPair::Context { rule, matched });
                true
            }
            Ok(None) => {
                self.logger.trace(&format!(" ~~ {rule} => no"));
                false
            }
            Err(e) => {
                self.logger.warn(&e.to_string());
                self.logger.trace(&format!(" ~~ {rule} => no"));
                false
            }
        }
    }
}

/// Infers contexts for `locations` with the default policy.
#[must_use]
pub fn infer_contexts<'r>(rules: &'r RuleSet, locations: &[Location]) -> Vec<ContextPair<'r>> {
    ContextInferencer::new(rules).infer(locations)
}
