//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use strata_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StrataResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle and give another to a
/// service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.as_ref().components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "filesystem lock poisoned".into(),
            })?;

        // Parent must exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}
