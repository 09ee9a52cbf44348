//! Installed application listing.

use serde::Serialize;
use std::path::Path;
use tracing::instrument;

use super::read_dir_named;
use crate::{application::ports::RepoFs, domain::layout, error::KustosResult};

/// One installed application and the projects it is installed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledApp {
    pub name: String,
    pub projects: Vec<String>,
}

/// List the applications under the apps directory, optionally restricted
/// to apps installed on one project.
///
/// Projects are the overlay names for base/overlay apps, or the child
/// directories themselves for apps laid out as plain per-project
/// directories. A repository without an apps directory lists as empty.
#[instrument(skip_all, fields(project = ?project))]
pub fn list_apps(repofs: &dyn RepoFs, project: Option<&str>) -> KustosResult<Vec<InstalledApp>> {
    let apps_dir = Path::new(layout::APPS_DIR);
    if !repofs.exists(apps_dir) {
        return Ok(Vec::new());
    }

    let mut apps = Vec::new();
    for name in read_dir_named(repofs, apps_dir)? {
        let app_dir = layout::app_dir(&name);
        if !repofs.is_dir(&app_dir) {
            continue;
        }

        let overlays_dir = layout::overlays_dir(&name);
        let projects: Vec<String> = if repofs.is_dir(&overlays_dir) {
            read_dir_named(repofs, &overlays_dir)?
        } else {
            read_dir_named(repofs, &app_dir)?
                .into_iter()
                .filter(|child| repofs.is_dir(&app_dir.join(child)))
                .collect()
        };

        if let Some(wanted) = project {
            if !projects.iter().any(|p| p == wanted) {
                continue;
            }
        }

        apps.push(InstalledApp { name, projects });
    }

    Ok(apps)
}
