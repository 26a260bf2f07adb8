pub mod common;
pub mod mutation;
pub mod options;
pub mod template;
pub mod workspace;

pub use crate::domain::DomainError;
pub use mutation::{FileMutation, MutationPlan};
pub use options::{GenerateOptions, ValidatedOptions};
pub use template::{RenderContext, TemplateDescriptor, TemplateKind};
pub use workspace::{ProjectDefinition, Workspace};
