//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! planning rules. Planning errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while reading the workspace or applying a plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No workspace manifest at the tree root.
    #[error("No workspace manifest found (looked for {looked_for})")]
    WorkspaceNotFound { looked_for: String },

    /// The manifest exists but cannot be understood.
    #[error("Invalid workspace manifest {path}: {reason}")]
    InvalidWorkspace { path: String, reason: String },

    /// The requested project is not declared in the workspace.
    #[error("Project '{name}' does not exist in the workspace")]
    ProjectNotFound { name: String, available: Vec<String> },

    /// Walking up from the target directory found no module file.
    #[error("Could not find an NgModule file above {searched_from}")]
    ModuleNotFound { searched_from: String },

    /// More than one candidate module in the nearest directory.
    #[error("More than one module matches in {directory}: {candidates:?}")]
    AmbiguousModule {
        directory: String,
        candidates: Vec<String>,
    },

    /// An explicit `--module` that does not exist.
    #[error("Specified module '{module}' does not exist")]
    ModuleMissing { module: String },

    /// A created file would replace an existing one.
    #[error("File already exists: {path}")]
    FileAlreadyExists { path: String },

    /// A file edited by the plan changed after the plan was computed.
    #[error("{path} changed after the plan was computed")]
    StalePlan { path: String },

    /// Template rendering failed.
    #[error("Template rendering failed for {template}: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory tree lock poisoned.
    #[error("Tree lock poisoned")]
    StoreLockError,

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WorkspaceNotFound { .. } => vec![
                "Run gridgen from the workspace root".into(),
                "Or pass --root <DIR> pointing at the directory holding angular.json".into(),
            ],
            Self::InvalidWorkspace { path, .. } => {
                vec![format!("Check that {path} is valid JSON with a \"projects\" object")]
            }
            Self::ProjectNotFound { available, .. } if !available.is_empty() => vec![
                format!("Available projects: {}", available.join(", ")),
                "Pass one of them with --project".into(),
            ],
            Self::ProjectNotFound { .. } => {
                vec!["The workspace declares no projects".into()]
            }
            Self::ModuleNotFound { .. } => vec![
                "Pass --module <PATH> to choose the module explicitly".into(),
                "Or pass --skip-import to generate without registering".into(),
            ],
            Self::AmbiguousModule { candidates, .. } => vec![
                format!("Candidates: {}", candidates.join(", ")),
                "Pass --module <PATH> to choose one".into(),
            ],
            Self::ModuleMissing { .. } => {
                vec!["--module is resolved relative to the component directory, then the workspace root".into()]
            }
            Self::FileAlreadyExists { path } => vec![
                format!("Remove {path} or pick another name"),
                "Use --force to overwrite (destructive)".into(),
            ],
            Self::StalePlan { path } => vec![
                format!("{path} was edited while gridgen was running"),
                "Run the command again to plan against the current content".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WorkspaceNotFound { .. }
            | Self::ProjectNotFound { .. }
            | Self::ModuleNotFound { .. }
            | Self::ModuleMissing { .. } => ErrorCategory::NotFound,
            Self::InvalidWorkspace { .. } => ErrorCategory::Configuration,
            Self::AmbiguousModule { .. }
            | Self::FileAlreadyExists { .. }
            | Self::StalePlan { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_not_found_lists_alternatives() {
        let err = ApplicationError::ProjectNotFound {
            name: "nope".into(),
            available: vec!["material".into(), "docs".into()],
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions()[0].contains("material, docs"));
    }

    #[test]
    fn existing_file_suggests_force() {
        let err = ApplicationError::FileAlreadyExists { path: "a.ts".into() };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn stale_plan_asks_for_a_rerun() {
        let err = ApplicationError::StalePlan {
            path: "src/app/app.module.ts".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("again")));
    }
}
