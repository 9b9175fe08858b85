//! CLI structure and argument definitions.
//!
//! This module defines the main CLI structure using clap's derive macros.
//! The tool has no subcommands: a shell hook invokes it once per command
//! line with the rules file and the command about to run.

use crate::commands::InferCommand;
use clap::Parser;

/// Infer a shell context from where a command runs.
#[derive(Parser)]
#[command(name = "contextual")]
#[command(
    version,
    about = "Infer a shell context from where a command runs",
    long_about = "Matches the command's directory, $PWD and the working directory against \
                  the directory landmarks of a rules file, and prints the joined contexts \
                  of the matching landmarks for the calling shell to evaluate."
)]
pub struct Cli {
    /// Trace matching on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress diagnostics
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub infer: InferCommand,
}
