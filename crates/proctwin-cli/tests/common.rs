//! Shared fixtures for CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const APPROVAL_CSV: &str = "\
case_id,step,timestamp
1,submit,2024-05-01 00:00:00
1,review,2024-05-01 02:00:00
1,approve,2024-05-01 05:00:00
2,submit,2024-05-01 00:00:00
2,review,2024-05-01 01:00:00
";

pub struct TestFixture {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    pub fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).expect("Failed to write config");
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `proctwin` isolated from the user's config and environment
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("proctwin").expect("binary built");
        cmd.arg("--config")
            .arg(&self.config_path)
            .env_remove("RUST_LOG")
            .env_remove("PROCTWIN_PATH");
        cmd
    }
}
