//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `gridgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Tree`: the workspace file tree
//!   - `WorkspaceReader`: workspace manifest parsing
//!   - `TemplateRenderer`: template bodies
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{TemplateRenderer, Tree, WorkspaceReader};
