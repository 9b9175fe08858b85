#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # contextual
//!
//! A library for inferring a shell context from where a command runs.
//!
//! A configuration file lists directory landmarks: path prefixes, optionally
//! constrained by `where` conditions on the filesystem, each bound to a
//! context template (environment assignments or commands for the shell to
//! evaluate). Given the candidate locations of a command invocation, the
//! matching landmarks' contexts are rendered and joined.
//!
//! ## Core Types
//!
//! - [`RuleSet`]: the parsed landmark rules of a configuration
//! - [`Landmark`] and [`LandmarkClause`]: a rule and its where clause
//! - [`ContextInferencer`] and [`Location`]: one matching pass over locations
//! - [`Template`]: placeholder substitution of matched paths
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use contextual::{assemble, ContextInferencer, Location, LocationKind, RuleSet};
//!
//! let rules = RuleSet::parse("/srv/* := export SITE={ctx_dir}\n");
//! let locations = [Location::new(LocationKind::Getcwd, "/srv/blog/posts")];
//! let pairs = ContextInferencer::new(&rules).infer(&locations);
//! assert_eq!(assemble(&pairs).joined(), "export SITE=/srv/blog");
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod landmark;
pub mod logging;
pub mod output;
pub mod path;
pub mod template;

// Re-export key types at crate root for convenience
pub use config::{RuleSet, SkippedRule};
pub use error::{Error, Result};
pub use inference::{
    collect_locations, infer_contexts, Consumption, ContextInferencer, ContextPair, Location,
    LocationKind,
};
pub use landmark::{CheckRegistry, Landmark, LandmarkClause, MatchedPaths, Wildcard};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{assemble, Assembly, ExitDirective};
pub use template::{Template, TemplateError};
