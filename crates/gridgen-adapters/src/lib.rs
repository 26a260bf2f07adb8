//! Infrastructure adapters for gridgen.
//!
//! This crate implements the ports defined in `gridgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod renderer;
pub mod tree;
pub mod workspace;

// Re-export commonly used adapters
pub use renderer::BuiltinRenderer;
pub use tree::{LocalTree, MemoryTree};
pub use workspace::AngularWorkspaceReader;
