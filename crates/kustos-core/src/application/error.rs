//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.
//!
//! Message formats for file writes are part of the observable contract:
//! every failed write is tagged with the file's logical name and the
//! absolute target path, e.g.
//! `failed to create 'config' file at '/repo/apps/app/overlays/prod/config.json': ...`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Raw filesystem operation failed (adapter-level).
    #[error("filesystem error at '{path}': {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A materialization write failed; `name` is the file's logical role
    /// ("base", "overlay", "manifests", "config", "namespace").
    #[error("failed to create '{name}' file at '{path}': {reason}")]
    WriteFile {
        name: String,
        path: PathBuf,
        reason: String,
    },

    /// Listing a directory failed.
    #[error("failed to read directory '{path}': {reason}")]
    ReadDir { path: PathBuf, reason: String },

    /// Removing a subtree failed.
    #[error("failed to delete directory '{path}': {reason}")]
    Remove { path: PathBuf, reason: String },

    /// The render collaborator failed while building flat manifests.
    #[error("failed to build manifests for '{specifier}': {reason}")]
    Render { specifier: String, reason: String },

    /// Serializing a document for writing failed.
    #[error("failed to marshal {what}: {reason}")]
    Encode { what: &'static str, reason: String },

    /// A document read back from the tree did not parse.
    #[error("failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } | Self::WriteFile { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions on the repository checkout".into(),
                "Each step is idempotent; re-run after fixing the cause".into(),
            ],
            Self::ReadDir { path, .. } | Self::Remove { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check permissions, then re-run; deletion is safe to retry".into(),
            ],
            Self::Render { specifier, .. } => vec![
                format!("Could not build manifests from '{}'", specifier),
                "Check that the source exists and contains YAML manifests".into(),
            ],
            Self::Parse { path, .. } => vec![
                format!("The file at {} is not valid", path.display()),
                "It may have been hand-edited; fix or delete it and retry".into(),
            ],
            Self::Encode { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { .. }
            | Self::WriteFile { .. }
            | Self::ReadDir { .. }
            | Self::Remove { .. } => ErrorCategory::Io,
            Self::Render { .. } | Self::Encode { .. } | Self::Parse { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
