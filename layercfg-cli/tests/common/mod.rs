//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with an isolated environment
//! - Configuration file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated temporary directory.
///
/// Commands built from it start with an empty process environment, so the
/// host's variables never leak into the loaded configuration.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with a cleared environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("layercfg").expect("Failed to find layercfg binary");
        cmd.env_clear();
        cmd
    }

    /// Get a command builder with the required password already set.
    pub fn command_valid(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("POSTGRES_PASSWORD", "secret");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file into the test environment and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A configuration file overriding a few fields of every section.
#[allow(dead_code)]
pub const SAMPLE_JSON: &str = r#"{
  "version": "1.4.2",
  "server": {"addr": "0.0.0.0:8000"},
  "postgres": {"host": "db.internal", "password": "from-file"},
  "replicas": [{"host": "replica-0.internal"}],
  "nats": {"reconnect_interval": "5s"}
}"#;
