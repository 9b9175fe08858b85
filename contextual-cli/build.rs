//! Build script for contextual-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs and
/// src/commands/infer.rs.
fn build_cli() -> Command {
    Command::new("contextual")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Infer a shell context from where a command runs")
        .long_about(
            "Matches the command's directory, $PWD and the working directory against the \
             directory landmarks of a rules file, and prints the joined contexts of the \
             matching landmarks for the calling shell to evaluate.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Trace matching on stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress diagnostics")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("shortcut")
                .long("shortcut")
                .value_name("NAME")
                .help("Resolve a shortcut name instead of the command's locations"),
        )
        .arg(
            Arg::new("retry-unmatched")
                .long("retry-unmatched")
                .help("Try rules that did not match again at the next location")
                .env("CONTEXTUAL_RETRY_UNMATCHED")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .value_name("RULES")
                .help("Rules file (a leading ~ is expanded)")
                .required(true),
        )
        .arg(
            Arg::new("command")
                .value_name("COMMAND")
                .help("The command about to run"),
        )
        .arg(
            Arg::new("trace")
                .value_name(":trace")
                .help("Trace matching and print an exit directive instead of the context"),
        )
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("contextual.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
