//! Unified error handling for gridgen core.
//!
//! Wraps domain and application errors in one type that carries a
//! category (for exit codes and styling) and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for gridgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridgenError {
    /// Invalid input or a module that cannot be rewritten.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Workspace, tree or rendering failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl GridgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `gridgen config path` to locate the active config file".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in gridgen".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type GridgenResult<T> = Result<T, GridgenError>;

/// Extension trait for adding context to foreign errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> GridgenResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> GridgenResult<T> {
        self.map_err(|e| GridgenError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
