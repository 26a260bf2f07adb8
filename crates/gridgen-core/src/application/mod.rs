//! Application layer for gridgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! planning rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ApplyMode, ApplySummary, GenerateService};

// Re-export port traits (for adapter implementation)
pub use ports::{TemplateRenderer, Tree, WorkspaceReader};

pub use error::ApplicationError;
