// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (plans are recomputed, never patched)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("required property '{option}' is missing")]
    MissingRequiredOption { option: &'static str },

    #[error("invalid value for '{option}': {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("Duplicate path in mutation plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the workspace root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Mutation plan is empty")]
    EmptyPlan,

    // ========================================================================
    // Rewrite Errors (the module file does not look like we expect)
    // ========================================================================
    #[error("could not find {anchor} in {path}")]
    AnchorNotFound { path: String, anchor: String },

    #[error("insertion at byte {position} does not fit content of {len} bytes")]
    InsertionOutOfBounds { position: usize, len: usize },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredOption { option } => vec![
                format!("The '{}' option must be provided", option),
                match *option {
                    "name" => "Example: gridgen generate my-grid".into(),
                    "project" => "Pass --project or set \"defaultProject\" in angular.json".into(),
                    _ => "Use --help for usage information".into(),
                },
            ],
            Self::InvalidOption { option, reason } => vec![
                format!("'{}' was rejected: {}", option, reason),
                "Use letters, digits, '-' and '_' in component names".into(),
            ],
            Self::AnchorNotFound { path, anchor } => vec![
                format!("{} does not contain {}", path, anchor),
                "Point --module at the file that declares your @NgModule".into(),
                "Or pass --skip-import and register the component by hand".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("'{}' would be generated twice", path),
                "This is a bug, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredOption { .. }
            | Self::InvalidOption { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Validation,
            Self::AnchorNotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicatePath { .. } | Self::EmptyPlan | Self::InsertionOutOfBounds { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
