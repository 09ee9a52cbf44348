//! Unified error handling for Kustos Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Kustos Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// kustos-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum KustosError {
    /// Errors from the domain layer (validation and collisions).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KustosError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Kustos".into(),
                "Please report this issue at: https://github.com/cosecruz/kustos/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Collision => ErrorCategory::Collision,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only I/O failures qualify: every materialization and pruning step is
    /// idempotent, so once the underlying cause is fixed a retry converges.
    /// Validation and collision errors need caller input instead.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Io
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Collision,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type KustosResult<T> = Result<T, KustosError>;
