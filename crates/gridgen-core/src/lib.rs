//! gridgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the gridgen
//! component generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           gridgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GenerateService)            │
//! │    plan → MutationPlan → apply          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Tree, WorkspaceReader, Renderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    gridgen-adapters (Infrastructure)    │
//! │ (LocalTree, MemoryTree, AngularReader)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Validator, Selector, Paths, Rewriter) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridgen_core::prelude::*;
//!
//! let service = GenerateService::new(tree, reader, renderer);
//! let plan = service.plan(&GenerateOptions::new("orders", "material"))?;
//! let summary = service.apply(&plan, ApplyMode::FailIfExists)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyMode, ApplySummary, GenerateService,
        ports::{TemplateRenderer, Tree, WorkspaceReader},
    };
    pub use crate::domain::{
        FileMutation, GenerateOptions, LibraryDefaults, MutationPlan, RelativePath, RenderContext,
        Style, TemplateKind, Workspace,
    };
    pub use crate::error::{GridgenError, GridgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
