//! Application layer for Kustos.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (install, prune, infer, list)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{InstallService, InstalledApp, delete_from_project, infer_app_type, list_apps};

// Re-export port traits (for adapter implementation)
pub use ports::{ManifestRenderer, RepoFs};

pub use error::ApplicationError;
