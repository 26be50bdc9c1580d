//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Section file helpers

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated configuration directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files
/// - A configuration directory path inside it
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the configuration directory
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The configuration directory is not created; use [`TestEnv::init`] or
    /// [`TestEnv::write_section`].
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_dir = temp_path.join("config");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// The configuration directory environment variable is cleared so the
    /// caller's environment cannot leak in.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("deepcfg").expect("Failed to find deepcfg binary");
        cmd.env_remove("DEEPCFG_CONFIG_DIR")
            .env_remove("DEEPCFG_LOG_MODE")
            .current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with `--config-dir` pointing at this
    /// environment's configuration directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Scaffold the configuration directory with `deepcfg init`.
    pub fn init(&self) {
        self.command().arg("--quiet").arg("init").assert().success();
    }

    /// Overwrite one section file.
    pub fn write_section(&self, section: &str, contents: &str) -> PathBuf {
        std::fs::create_dir_all(&self.config_dir).expect("Failed to create config dir");
        let path = self.section_path(section);
        std::fs::write(&path, contents).expect("Failed to write section file");
        path
    }

    /// Read one section file.
    pub fn read_section(&self, section: &str) -> String {
        std::fs::read_to_string(self.section_path(section)).expect("Failed to read section file")
    }

    /// Location of a section file.
    pub fn section_path(&self, section: &str) -> PathBuf {
        self.config_dir.join(format!("{section}.yaml"))
    }
}

/// Every section of the built-in schema, in file order.
#[allow(dead_code)]
pub const SECTIONS: [&str; 9] = [
    "project",
    "model",
    "training",
    "data",
    "transform",
    "optimizer",
    "metrics",
    "losses",
    "history",
];
