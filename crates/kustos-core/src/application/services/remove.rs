//! Project pruning - removing an application's footprint from a project.

use tracing::{debug, instrument, warn};

use super::{io_reason, read_dir_named};
use crate::{
    application::{ApplicationError, ports::RepoFs},
    domain::layout,
    error::KustosResult,
};

/// Remove `app_name`'s footprint from `project_name`.
///
/// For base/overlay apps the project's overlay directory is removed; when
/// it is the last overlay the whole `apps/<app>` subtree goes with it, so
/// no orphaned base lingers. Apps laid out as plain per-project
/// directories (`apps/<app>/<project>`, no `overlays` indirection) are
/// pruned the same way.
///
/// A footprint that is already absent is success, not an error. Partial
/// deletion is an acceptable intermediate state: re-running converges.
#[instrument(skip_all, fields(app = %app_name, project = %project_name))]
pub fn delete_from_project(
    repofs: &dyn RepoFs,
    app_name: &str,
    project_name: &str,
) -> KustosResult<()> {
    let app_dir = layout::app_dir(app_name);
    let overlays_dir = layout::overlays_dir(app_name);

    let dir_to_remove = if repofs.exists(&overlays_dir) {
        // base/overlay layout
        let overlay_dir = layout::overlay_dir(app_name, project_name);
        if !repofs.exists(&overlay_dir) {
            warn!("application not installed on project, nothing to do");
            return Ok(());
        }
        if read_dir_named(repofs, &overlays_dir)?.len() == 1 {
            app_dir
        } else {
            overlay_dir
        }
    } else {
        // plain per-project directory layout
        let project_dir = layout::project_dir(app_name, project_name);
        if !repofs.exists(&project_dir) {
            warn!("application not installed on project, nothing to do");
            return Ok(());
        }
        if read_dir_named(repofs, &app_dir)?.len() == 1 {
            app_dir
        } else {
            project_dir
        }
    };

    debug!(path = %dir_to_remove.display(), "removing application footprint");
    repofs.remove_all(&dir_to_remove).map_err(|e| {
        ApplicationError::Remove {
            reason: io_reason(&e),
            path: dir_to_remove,
        }
        .into()
    })
}
