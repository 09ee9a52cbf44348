//! Application type inference.

use std::path::Path;
use tracing::debug;

use crate::application::ports::RepoFs;
use crate::domain::{AppType, app_type};

/// Classify the configuration format of a source directory.
///
/// Duck-typed over the directory's contents as a strict priority chain,
/// first match wins:
/// 1. `app.yaml` and `components/params.libsonnet` (both files) - ksonnet
/// 2. `Chart.yaml` - helm
/// 3. `kustomization.yaml` or `kustomization.yml` (file), or a
///    `Kustomization` directory - kustomize
/// 4. anything else, including an empty tree - directory
///
/// There is no error path; an unreadable entry simply fails its predicate.
pub fn infer_app_type(repofs: &dyn RepoFs) -> AppType {
    let inferred = if repofs.is_file(Path::new(app_type::KSONNET_APP_MARKER))
        && repofs.is_file(Path::new(app_type::KSONNET_PARAMS_MARKER))
    {
        AppType::Ksonnet
    } else if repofs.exists(Path::new(app_type::HELM_MARKER)) {
        AppType::Helm
    } else if is_kustomization_dir(repofs) {
        AppType::Kustomize
    } else {
        AppType::Directory
    };

    debug!(app_type = %inferred, "inferred application type");
    inferred
}

fn is_kustomization_dir(repofs: &dyn RepoFs) -> bool {
    app_type::KUSTOMIZE_FILE_MARKERS
        .iter()
        .any(|marker| repofs.is_file(Path::new(marker)))
        || repofs.is_dir(Path::new(app_type::KUSTOMIZE_DIR_MARKER))
}
