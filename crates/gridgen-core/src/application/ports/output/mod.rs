//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `gridgen-adapters` crate provides implementations.

use crate::domain::{RelativePath, RenderContext, TemplateKind, Workspace};
use crate::error::GridgenResult;

/// Port for the workspace file tree.
///
/// Every path is relative to the workspace root.
///
/// Implemented by:
/// - `gridgen_adapters::tree::LocalTree` (production)
/// - `gridgen_adapters::tree::MemoryTree` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Tree: Send + Sync {
    /// Check if a file or directory exists.
    fn exists(&self, path: &RelativePath) -> bool;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &RelativePath) -> GridgenResult<String>;

    /// Names of the files directly inside `dir`, sorted.
    ///
    /// A missing directory has no files.
    fn list_files(&self, dir: &RelativePath) -> GridgenResult<Vec<String>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &RelativePath) -> GridgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &RelativePath, content: &str) -> GridgenResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &RelativePath) -> GridgenResult<()>;
}

/// Port for parsing the workspace manifest.
///
/// Implemented by:
/// - `gridgen_adapters::workspace::AngularWorkspaceReader`
#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceReader: Send + Sync {
    /// Manifest file names to look for at the tree root, in priority order.
    fn manifest_names(&self) -> Vec<String>;

    /// Parse a manifest read from `path`.
    fn parse(&self, path: &RelativePath, content: &str) -> GridgenResult<Workspace>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `gridgen_adapters::renderer::BuiltinRenderer` (bundled grid templates)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the body of one template kind.
    fn render(&self, kind: TemplateKind, context: &RenderContext) -> GridgenResult<String>;
}
