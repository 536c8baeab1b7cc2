//! Location rules for workflow files.

use std::path::{Component, Path, PathBuf};

use super::AppError;

const WORKFLOWS_SEGMENT: &str = ".github/workflows/";
const GITHUB_DIR: &str = ".github";

/// A workflow file path that satisfies the textual location rules.
///
/// Guarantees:
/// - Ends with `.yml`
/// - Contains a `.github/workflows/` segment
///
/// Whether the repository's `.git/` directory exists is checked by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPath {
    absolute: PathBuf,
    git_dir: PathBuf,
}

impl WorkflowPath {
    /// Validate `path`, resolving it against `cwd` when relative.
    pub fn parse(path: &Path, cwd: &Path) -> Result<Self, AppError> {
        let text = path.to_string_lossy().replace('\\', "/");
        if !text.ends_with(".yml") {
            return Err(AppError::NotYamlFile(path.display().to_string()));
        }
        if !text.contains(WORKFLOWS_SEGMENT) {
            return Err(AppError::NotInWorkflowsDir(path.display().to_string()));
        }

        let absolute = normalize_path(&cwd.join(path));
        let absolute_text = absolute.to_string_lossy();
        let Some(index) = absolute_text.find(GITHUB_DIR) else {
            return Err(AppError::NotInWorkflowsDir(path.display().to_string()));
        };
        let git_dir = PathBuf::from(format!("{}.git/", &absolute_text[..index]));

        Ok(Self { absolute, git_dir })
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// The `.git/` directory expected next to the first `.github` segment.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
