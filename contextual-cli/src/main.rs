//! Main entry point for the contextual CLI.
//!
//! A shell hook runs `contextual RULES COMMAND [:trace]` before each command
//! and evaluates stdout. On success stdout holds the joined context (or
//! `exit 0` in trace mode); on failure it holds `exit <code>` and the process
//! exits with that code, so the evaluating shell sees the failure too.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use contextual::{ExitDirective, Logger};
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments; help and version go through clap untouched
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let message = e.to_string();
            let message = message.trim_start_matches("error: ").trim_end();
            fail(&CliError::InvalidArguments(message.to_string()), Logger::default())
        }
    };

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    let logger = cli.infer.logger(&global);

    if let Err(e) = cli.infer.execute(&global) {
        fail(&e, logger);
    }
}

fn fail(error: &CliError, logger: Logger) -> ! {
    let code = error.exit_code();
    logger.error(&error.to_string());
    println!("{}", ExitDirective(code));
    std::process::exit(code);
}
