//! Utility functions for CLI operations.
//!
//! Everything that reads the process environment lives here, so the library
//! only ever sees explicit values.

use crate::error::CliError;
use contextual::{collect_locations, Location};
use std::env;
use std::path::PathBuf;

/// Global CLI options.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    /// Trace matching on stderr.
    pub verbose: bool,

    /// Suppress diagnostics.
    pub quiet: bool,
}

/// Returns `$PWD`, or `None` when it is unset or empty.
pub fn env_pwd() -> Option<PathBuf> {
    env::var_os("PWD")
        .filter(|pwd| !pwd.is_empty())
        .map(PathBuf::from)
}

/// Gathers the candidate locations of `command`: its directory, `$PWD` and
/// the working directory, in that order.
pub fn gather_locations(command: &str) -> Result<Vec<Location>, CliError> {
    let cwd = env::current_dir()?;
    let pwd = env_pwd();
    Ok(collect_locations(command, pwd.as_deref(), &cwd))
}
