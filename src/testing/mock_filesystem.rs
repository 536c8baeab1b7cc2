//! In-memory test double for `WorkflowFilesystem`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::WorkflowFilesystem;

/// Root every relative path is resolved against.
pub const MOCK_ROOT: &str = "/repo";

/// In-memory filesystem rooted at [`MOCK_ROOT`].
#[derive(Clone, Debug)]
pub struct MockFilesystem {
    root: PathBuf,
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
}

impl Default for MockFilesystem {
    fn default() -> Self {
        Self {
            root: PathBuf::from(MOCK_ROOT),
            files: Arc::new(Mutex::new(HashMap::new())),
            dirs: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let full_path = self.resolve_path(Path::new(path));
        self.files.lock().unwrap().insert(full_path, content.to_string());
        self
    }

    /// Seed an empty directory, e.g. `.git`.
    pub fn with_dir(self, path: &str) -> Self {
        let full_path = self.resolve_path(Path::new(path));
        self.dirs.lock().unwrap().insert(full_path);
        self
    }

    /// Content of a file, if present.
    pub fn contents(&self, path: &str) -> Option<String> {
        let full_path = self.resolve_path(Path::new(path));
        self.files.lock().unwrap().get(&full_path).cloned()
    }
}

impl WorkflowFilesystem for MockFilesystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        let full_path = self.resolve_path(path);
        self.files.lock().unwrap().get(&full_path).cloned().ok_or_else(|| {
            AppError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "Mock file not found"))
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full_path = self.resolve_path(path);
        self.files.lock().unwrap().insert(full_path, content.to_string());
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        let full_path = self.resolve_path(path);
        self.files.lock().unwrap().contains_key(&full_path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let full_path = self.resolve_path(path);
        if self.dirs.lock().unwrap().iter().any(|dir| dir.starts_with(&full_path)) {
            return true;
        }
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|file| file != &full_path && file.starts_with(&full_path))
    }
}
