//! Final context assembly.
//!
//! Matches are collected most specific location first; assembly reverses
//! them so that, once the calling shell evaluates the joined result, the
//! earliest matches are applied last and take precedence.

use std::fmt;

use crate::error::Error;
use crate::inference::ContextPair;

/// Separator between contexts in the assembled output.
pub const CONTEXT_SEPARATOR: &str = ";";

/// The rendered contexts of an inference pass.
#[derive(Debug, Default)]
pub struct Assembly {
    contexts: Vec<String>,
    failures: Vec<Error>,
}

impl Assembly {
    /// Returns the rendered contexts, in output order.
    #[must_use]
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// Returns the contexts that could not be rendered.
    #[must_use]
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// Returns the contexts joined for the shell.
    #[must_use]
    pub fn joined(&self) -> String {
        self.contexts.join(CONTEXT_SEPARATOR)
    }
}

/// Renders the context of every non-void pair, in reverse order.
///
/// A template that cannot be rendered is left out and recorded as a
/// failure; the others are still assembled.
///
/// # Examples
///
/// ```
/// use contextual::config::RuleSet;
/// use contextual::inference::{infer_contexts, Location, LocationKind};
/// use contextual::output::assemble;
///
/// let rules = RuleSet::parse("/ := A={0}\n/w := B={ctx_dir}\n/w/x := C={9}\n");
/// let pairs = infer_contexts(&rules, &[Location::new(LocationKind::Getcwd, "/w/x")]);
/// let assembly = assemble(&pairs);
/// assert_eq!(assembly.joined(), "B=/w;A=/");
/// assert_eq!(assembly.failures().len(), 1);
/// ```
#[must_use]
pub fn assemble(pairs: &[ContextPair<'_>]) -> Assembly {
    let mut assembly = Assembly::default();
    for pair in pairs.iter().rev() {
        let ContextPair::Context { rule, matched } = pair else {
            continue;
        };
        match rule.context().render(&matched.to_args()) {
            Ok(context) => assembly.contexts.push(context),
            Err(source) => assembly.failures.push(Error::Rule {
                rule: rule.source().to_string(),
                source,
            }),
        }
    }
    assembly
}

/// A shell directive telling the caller which exit status to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitDirective(
    /// The exit status.
    pub i32,
);

impl fmt::Display for ExitDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit {}", self.0)
    }
}
