//! CLI command implementations.
//!
//! - `infer`: match the rules against a command invocation and print the
//!   context

pub mod infer;

pub use infer::InferCommand;
