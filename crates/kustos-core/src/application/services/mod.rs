//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level operations: install an application, prune it from a project,
//! classify a source directory, list what is installed.

pub mod infer;
pub mod install;
pub mod list;
pub mod remove;

pub use infer::infer_app_type;
pub use install::InstallService;
pub use list::{InstalledApp, list_apps};
pub use remove::delete_from_project;

use std::path::Path;

use crate::application::ApplicationError;
use crate::application::ports::RepoFs;
use crate::error::{KustosError, KustosResult};

/// Innermost reason of a wrapped filesystem error, so re-wrapping with
/// operation context does not stack layer prefixes in the message.
pub(crate) fn io_reason(err: &KustosError) -> String {
    match err {
        KustosError::Application(ApplicationError::Filesystem { reason, .. }) => reason.clone(),
        other => other.to_string(),
    }
}

/// Directory listing with directory-path context on failure.
pub(crate) fn read_dir_named(repofs: &dyn RepoFs, path: &Path) -> KustosResult<Vec<String>> {
    repofs.read_dir(path).map_err(|e| {
        ApplicationError::ReadDir {
            path: path.to_path_buf(),
            reason: io_reason(&e),
        }
        .into()
    })
}
