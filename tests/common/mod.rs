//! Shared testing utilities for ghsched CLI tests.

use assert_cmd::Command;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Workflow path used when no config or flag names one.
pub const DEFAULT_WORKFLOW: &str = ".github/workflows/scheduled-jobs.yml";

/// Testing harness providing an isolated repository for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with a `.git/` directory.
    pub fn new() -> Self {
        let ctx = Self::without_git();
        fs::create_dir_all(ctx.work_dir.join(".git")).expect("Failed to create .git directory");
        ctx
    }

    /// Create a new isolated environment that is not a git repository.
    pub fn without_git() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the repository directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `ghsched` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("ghsched").expect("Failed to locate ghsched binary");
        cmd.current_dir(&self.work_dir).env_remove("GHSCHED_WORKFLOW").env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory, creating parents.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write test file");
    }

    /// Read a file relative to the work directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Parse a YAML file relative to the work directory.
    pub fn read_yaml(&self, relative: &str) -> Value {
        serde_yaml::from_str(&self.read(relative)).expect("Written file should be valid YAML")
    }

    /// Whether a file exists relative to the work directory.
    pub fn exists(&self, relative: &str) -> bool {
        self.work_dir.join(relative).exists()
    }
}

/// A single-job jobs file: `Deploy` at 2021-01-01T00:00:00Z on ubuntu-latest.
#[allow(dead_code)]
pub const DEPLOY_JOBS: &str = r#"
- name: Deploy
  time: 2021-01-01T00:00:00Z
  runs-on: ubuntu-latest
  steps:
    - uses: actions/checkout@v4
"#;

/// Slug generated for [`DEPLOY_JOBS`].
#[allow(dead_code)]
pub const DEPLOY_KEY: &str = "deploy-at-2021-01-01t000000000z";
