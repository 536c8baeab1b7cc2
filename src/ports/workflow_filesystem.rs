//! Filesystem access needed to load and persist workflow files.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Port for the file operations around a merge.
///
/// Relative `path` arguments are resolved against [`WorkflowFilesystem::root`].
pub trait WorkflowFilesystem {
    /// Directory relative paths are resolved against.
    fn root(&self) -> &Path;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Write UTF-8 content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError>;

    /// Check whether a file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Check whether a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Resolve a path against the root. Absolute paths are returned unchanged.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.root().join(path)
    }
}
