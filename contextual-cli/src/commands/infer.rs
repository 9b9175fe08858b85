//! Infer command implementation.
//!
//! Loads the rules file, matches it against the candidate locations of the
//! command (or against a shortcut name), and prints the assembled context.

use crate::error::CliError;
use crate::utils::{gather_locations, GlobalOptions};
use clap::Args;
use contextual::{
    assemble, init_logger, Consumption, ContextInferencer, ContextPair, Error as LibError,
    ExitDirective, Logger, RuleSet,
};
use std::path::PathBuf;

/// Trailing argument that turns on trace mode.
pub const TRACE_MARKER: &str = ":trace";

/// Infer the context of a command invocation.
#[derive(Args)]
pub struct InferCommand {
    /// Rules file (a leading ~ is expanded)
    #[arg(value_name = "RULES")]
    pub config: PathBuf,

    /// The command about to run
    #[arg(
        value_name = "COMMAND",
        allow_hyphen_values = true,
        required_unless_present = "shortcut"
    )]
    pub command: Option<String>,

    /// Trace matching and print an exit directive instead of the context
    #[arg(value_name = ":trace", value_parser = [TRACE_MARKER])]
    pub trace: Option<String>,

    /// Resolve a shortcut name instead of the command's locations
    #[arg(long, value_name = "NAME")]
    pub shortcut: Option<String>,

    /// Try rules that did not match again at the next location
    #[arg(long, env = "CONTEXTUAL_RETRY_UNMATCHED")]
    pub retry_unmatched: bool,
}

impl InferCommand {
    /// Returns true when `:trace` was given.
    pub fn is_trace(&self) -> bool {
        self.trace.is_some()
            || (self.shortcut.is_some() && self.command.as_deref() == Some(TRACE_MARKER))
    }

    fn consumption(&self) -> Consumption {
        if self.retry_unmatched {
            Consumption::OnMatch
        } else {
            Consumption::OnAttempt
        }
    }

    /// Builds the logger for this invocation; trace mode implies verbose.
    pub fn logger(&self, global: &GlobalOptions) -> Logger {
        init_logger(global.verbose || self.is_trace(), global.quiet)
    }

    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let logger = self.logger(global);

        // 1. Load rules; bad lines are reported and skipped
        let rules = RuleSet::load(&self.config)?;
        for skipped in rules.skipped() {
            logger.warn(&skipped.to_string());
        }

        // 2. Match
        let inferencer = ContextInferencer::new(&rules)
            .with_consumption(self.consumption())
            .with_logger(logger);
        let pairs = self.infer(&inferencer)?;

        // 3. Assemble, dropping contexts that cannot be rendered
        let assembly = assemble(&pairs);
        for failure in assembly.failures() {
            logger.warn(&failure.to_string());
        }

        // 4. Output
        let joined = assembly.joined();
        if self.is_trace() {
            logger.trace(&format!("CONTEXT => {joined}"));
            println!("{}", ExitDirective(0));
        } else {
            println!("{joined}");
        }

        Ok(())
    }

    fn infer<'r>(
        &self,
        inferencer: &ContextInferencer<'r>,
    ) -> Result<Vec<ContextPair<'r>>, CliError> {
        if let Some(name) = &self.shortcut {
            let pairs = inferencer.infer_shortcut(name);
            if pairs.is_empty() {
                return Err(LibError::NoShortcut { name: name.clone() }.into());
            }
            return Ok(pairs);
        }

        let command = self
            .command
            .as_deref()
            .ok_or_else(|| CliError::InvalidArguments("missing COMMAND".to_string()))?;
        let locations = gather_locations(command)?;
        let pairs = inferencer.infer(&locations);
        if pairs.is_empty() {
            return Err(LibError::NoContext { locations }.into());
        }
        Ok(pairs)
    }
}
