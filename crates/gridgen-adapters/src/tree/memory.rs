//! In-memory tree adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, RwLock},
};

use gridgen_core::{
    application::{ApplicationError, ports::Tree},
    domain::RelativePath,
    error::GridgenResult,
};

/// In-memory tree. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    inner: Arc<RwLock<MemoryTreeInner>>,
}

#[derive(Debug, Default)]
struct MemoryTreeInner {
    files: BTreeMap<RelativePath, String>,
    directories: BTreeSet<RelativePath>,
}

impl MemoryTreeInner {
    fn add_ancestors(&mut self, path: &RelativePath) {
        let mut current = path.parent();
        while let Some(dir) = current {
            current = dir.parent();
            self.directories.insert(dir);
        }
    }
}

impl MemoryTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn seed(&self, path: &str, content: &str) -> GridgenResult<()> {
        let path = RelativePath::try_new(path)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.add_ancestors(&path);
        inner.files.insert(path, content.to_string());
        Ok(())
    }

    /// Read a file's content (testing helper).
    pub fn read(&self, path: &str) -> Option<String> {
        let path = RelativePath::try_new(path).ok()?;
        let inner = self.inner.read().ok()?;
        inner.files.get(&path).cloned()
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

impl Tree for MemoryTree {
    fn exists(&self, path: &RelativePath) -> bool {
        self.inner
            .read()
            .map(|inner| {
                path.is_root() || inner.files.contains_key(path) || inner.directories.contains(path)
            })
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &RelativePath) -> GridgenResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.as_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn list_files(&self, dir: &RelativePath) -> GridgenResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner
            .files
            .keys()
            .filter(|path| path.parent().as_ref() == Some(dir))
            .filter_map(|path| path.file_name().map(str::to_string))
            .collect())
    }

    fn create_dir_all(&self, path: &RelativePath) -> GridgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.add_ancestors(path);
        if !path.is_root() {
            inner.directories.insert(path.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &RelativePath, content: &str) -> GridgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.is_root() && !inner.directories.contains(&parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.as_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.clone(), content.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &RelativePath) -> GridgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.files.remove(path).map(|_| ()).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.as_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }
}
