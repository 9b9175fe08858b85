//! Path handling for landmark matching.
//!
//! # Segmentation
//!
//! Matching compares rule prefixes and candidate locations component by
//! component. [`segs`] splits an absolute path into components and
//! [`join_segs`] rebuilds the directory for a leading slice of them.
//!
//! # Normalization
//!
//! Rule patterns and command paths go through [`normalize`] first:
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths
//! - Resolving `.` and `..` components lexically
//!
//! # Examples
//!
//! ```
//! use contextual::path::{join_segs, segs};
//! use std::path::Path;
//!
//! let location = Path::new("/home/user0/foo/bar");
//! let segments = segs(location);
//! assert_eq!(join_segs(&segments[..2]), Path::new("/home/user0"));
//! ```

pub mod normalize;
mod segments;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use segments::{join_segs, segs};
