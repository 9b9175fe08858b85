//! Library exports for contextual-cli.
//!
//! This module exports the CLI structure so tests and benchmarks can drive
//! it without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
