//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary project tree
//! - Command builder helpers that pin the working directory and `$PWD`

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with a small project tree.
///
/// ```text
/// home/user0/proj1/a
/// home/user0/proj2/b
/// home/user0/proj2/p1 -> ../proj1
/// ```
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// `home/user0`
    pub home: PathBuf,
    /// `home/user0/proj1`
    pub proj1: PathBuf,
    /// `home/user0/proj2`
    pub proj2: PathBuf,
    /// Path of the rules file
    pub rules: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty rules file.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home").join("user0");
        let proj1 = home.join("proj1");
        let proj2 = home.join("proj2");
        std::fs::create_dir_all(proj1.join("a")).expect("Failed to create proj1/a");
        std::fs::create_dir_all(proj2.join("b")).expect("Failed to create proj2/b");
        #[cfg(unix)]
        std::os::unix::fs::symlink(&proj1, proj2.join("p1")).expect("Failed to create symlink");

        let rules = home.join("ctx.conf");
        std::fs::write(&rules, "").expect("Failed to write rules");

        Self {
            temp_dir,
            home,
            proj1,
            proj2,
            rules,
        }
    }

    /// Replace the rules file contents.
    pub fn write_rules(&self, text: &str) {
        std::fs::write(&self.rules, text).expect("Failed to write rules");
    }

    /// Get a bare command builder without arguments.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("contextual").expect("Failed to find contextual binary")
    }

    /// Get a command builder that runs in `dir`, with `$PWD` set to `pwd`.
    pub fn command_at(&self, dir: &Path, pwd: &Path) -> Command {
        let mut cmd = self.command_bare();
        cmd.current_dir(dir).env("PWD", pwd);
        cmd.env_remove("CONTEXTUAL_LOG_MODE");
        cmd.env_remove("CONTEXTUAL_RETRY_UNMATCHED");
        cmd
    }

    /// Get a command builder that runs in `dir` with a matching `$PWD` and
    /// the rules file as first argument.
    pub fn command_in(&self, dir: &Path) -> Command {
        let mut cmd = self.command_at(dir, dir);
        cmd.arg(&self.rules);
        cmd
    }

    /// Render `path` for a rules file line.
    pub fn rule_path(path: &Path) -> String {
        path.to_str().expect("test paths are UTF-8").to_string()
    }
}
