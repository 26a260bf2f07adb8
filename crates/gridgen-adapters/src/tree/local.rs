//! Local file tree adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use gridgen_core::{
    application::{ApplicationError, ports::Tree},
    domain::RelativePath,
    error::{GridgenError, GridgenResult},
};

/// Production tree rooted at a workspace directory on disk.
#[derive(Debug, Clone)]
pub struct LocalTree {
    root: PathBuf,
}

impl LocalTree {
    /// Create a tree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &RelativePath) -> PathBuf {
        self.root.join(path.as_path_buf())
    }
}

impl Tree for LocalTree {
    fn exists(&self, path: &RelativePath) -> bool {
        self.resolve(path).exists()
    }

    fn read_to_string(&self, path: &RelativePath) -> GridgenResult<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|e| map_io_error(&full, e, "read file"))
    }

    fn list_files(&self, dir: &RelativePath) -> GridgenResult<Vec<String>> {
        let full = self.resolve(dir);
        let entries = match std::fs::read_dir(&full) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io_error(&full, e, "list directory")),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(&full, e, "list directory"))?;
            let is_file = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "get metadata"))?
                .is_file();
            if let (true, Ok(name)) = (is_file, entry.file_name().into_string()) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn create_dir_all(&self, path: &RelativePath) -> GridgenResult<()> {
        let full = self.resolve(path);
        std::fs::create_dir_all(&full).map_err(|e| map_io_error(&full, e, "create directory"))
    }

    fn write_file(&self, path: &RelativePath, content: &str) -> GridgenResult<()> {
        let full = self.resolve(path);
        std::fs::write(&full, content).map_err(|e| map_io_error(&full, e, "write file"))
    }

    fn remove_file(&self, path: &RelativePath) -> GridgenResult<()> {
        let full = self.resolve(path);
        std::fs::remove_file(&full).map_err(|e| map_io_error(&full, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GridgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
