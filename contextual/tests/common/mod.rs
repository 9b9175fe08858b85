//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for testing the contextual library
//! against a real directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use contextual::landmark::{CheckRegistry, LandmarkClause};
use contextual::path::segs;

/// A home directory with a location below it.
///
/// ```text
/// home/user0/.bashrc     "#", mode 0700
/// home/user0/x/
/// home/user0/y/z/
/// ```
///
/// `here` is `home/user0/foo/bar`, which does not exist: matching works on
/// the location's segments and only tests landmark conditions on disk.
#[allow(dead_code)]
pub struct HomeAndHere {
    /// Temporary directory (kept alive for the duration of the test)
    _temp_dir: tempfile::TempDir,
    /// `home/user0`
    pub home: PathBuf,
    /// `home/user0/foo/bar`
    pub here: PathBuf,
    /// Segments of `here`
    pub here_segs: Vec<String>,
}

#[allow(dead_code)]
impl HomeAndHere {
    /// Creates the fixture tree.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home").join("user0");
        fs::create_dir_all(home.join("x")).expect("Failed to create x");
        fs::create_dir_all(home.join("y").join("z")).expect("Failed to create y/z");

        let bashrc = home.join(".bashrc");
        fs::write(&bashrc, "#").expect("Failed to write .bashrc");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&bashrc, fs::Permissions::from_mode(0o700))
                .expect("Failed to chmod .bashrc");
        }

        let here = home.join("foo").join("bar");
        let here_segs = segs(&here);
        Self {
            _temp_dir: temp_dir,
            home,
            here,
            here_segs,
        }
    }

    /// `home/user0/.bashrc`
    pub fn bashrc(&self) -> PathBuf {
        self.home.join(".bashrc")
    }

    /// The parent of `home/user0`.
    pub fn home_parent(&self) -> &Path {
        self.home.parent().expect("home has a parent")
    }
}

/// A clause that holds where `.bashrc` is non-empty and executable.
#[allow(dead_code)]
pub fn non_empty_and_executable_bashrc() -> LandmarkClause {
    let checks = CheckRegistry::builtin();
    let mut clause = LandmarkClause::new();
    clause.push_cond(checks.get("-s").expect("builtin -s").clone(), ".bashrc");
    clause.push_cond(checks.get("-x").expect("builtin -x").clone(), "{1}");
    clause
}

/// A clause that can never hold.
#[allow(dead_code)]
pub fn hopeless_clause() -> LandmarkClause {
    let always = contextual::landmark::Check::new("-t", |_| true);
    let mut clause = LandmarkClause::new();
    clause.push_cond(always, ".non-existent-file");
    clause
}
