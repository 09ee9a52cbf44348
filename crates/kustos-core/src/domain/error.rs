// ============================================================================
// domain/error.rs - DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors - bad caller input, never retryable as-is
    // ========================================================================
    #[error("application specifier may not be empty")]
    EmptyAppSpecifier,

    #[error("application name may not be empty")]
    EmptyAppName,

    #[error("project name may not be empty")]
    EmptyProjectName,

    #[error("unknown installation mode: {0}")]
    UnknownInstallationMode(String),

    #[error("unknown base matching policy: {0}")]
    UnknownBaseMatching(String),

    #[error("unknown application type: {0}")]
    UnknownAppType(String),

    // ========================================================================
    // Collision Errors - the tree already holds something incompatible
    // ========================================================================
    #[error("an application with the same name but a different base already exists")]
    AppCollisionWithExistingBase,

    #[error("application is already installed on this project")]
    AppAlreadyInstalledOnProject,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyAppSpecifier => vec![
                "Pass the application source after the name".into(),
                "Example: kustos app create billing github.com/owner/repo/manifests?ref=v1.2.3"
                    .into(),
            ],
            Self::EmptyAppName => vec!["Pass the application name as the first argument".into()],
            Self::EmptyProjectName => vec!["Pass the target project with --project".into()],
            Self::UnknownInstallationMode(mode) => vec![
                format!("'{}' is not an installation mode", mode),
                "Valid modes: normal, flat".into(),
            ],
            Self::UnknownBaseMatching(policy) => vec![
                format!("'{}' is not a base matching policy", policy),
                "Valid policies: structural, location".into(),
            ],
            Self::UnknownAppType(_) => {
                vec!["Valid types: ksonnet, helm, kustomize, directory".into()]
            }
            Self::AppCollisionWithExistingBase => vec![
                "An app of this name is already installed from a different source".into(),
                "Choose a different name, or delete the existing app first".into(),
            ],
            Self::AppAlreadyInstalledOnProject => vec![
                "This app+project pair already exists".into(),
                "Delete it first: kustos app delete <name> --project <project>".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AppCollisionWithExistingBase | Self::AppAlreadyInstalledOnProject => {
                ErrorCategory::Collision
            }
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Collision,
}
