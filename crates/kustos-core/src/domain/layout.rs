//! Repository tree layout.
//!
//! Every application footprint lives under a fixed tree rooted at the apps
//! directory of the repository checkout:
//!
//! ```text
//! apps/
//! └── <app>/
//!     ├── base/
//!     │   ├── kustomization.yaml
//!     │   └── install.yaml              (flat installs only)
//!     └── overlays/
//!         └── <project>/
//!             ├── kustomization.yaml
//!             ├── config.json
//!             └── namespace.yaml        (when a namespace is set)
//! ```
//!
//! Exactly one `base` exists per app name, shared read-only by every
//! project overlay of that app. Apps installed without the base/overlay
//! split use `apps/<app>/<project>` directly.
//!
//! All helpers produce slash-separated repo-relative paths; the tree is
//! consumed by sync tooling that expects forward slashes on every host OS.

use std::path::PathBuf;

/// Directory holding every application subtree.
pub const APPS_DIR: &str = "apps";

/// Shared base directory name inside an app subtree.
pub const BASE_DIR: &str = "base";

/// Per-project overlays directory name inside an app subtree.
pub const OVERLAYS_DIR: &str = "overlays";

/// Resource-list document name, used for both base and overlays.
pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

/// Rendered-manifest file name for flat installs.
pub const INSTALL_FILE: &str = "install.yaml";

/// Machine-readable metadata record stored beside each overlay.
pub const CONFIG_FILE: &str = "config.json";

/// Namespace document stored beside an overlay when a namespace is set.
pub const NAMESPACE_FILE: &str = "namespace.yaml";

/// Fixed relative reference from any overlay back to its base.
pub const BASE_BACK_REF: &str = "../../base";

/// `apps/<app>`
pub fn app_dir(app_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}"))
}

/// `apps/<app>/base`
pub fn base_dir(app_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}/{BASE_DIR}"))
}

/// `apps/<app>/base/kustomization.yaml`
pub fn base_kustomization(app_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}/{BASE_DIR}/{KUSTOMIZATION_FILE}"))
}

/// `apps/<app>/base/install.yaml`
pub fn install_manifest(app_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}/{BASE_DIR}/{INSTALL_FILE}"))
}

/// `apps/<app>/overlays`
pub fn overlays_dir(app_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}/{OVERLAYS_DIR}"))
}

/// `apps/<app>/overlays/<project>`
pub fn overlay_dir(app_name: &str, project_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}/{OVERLAYS_DIR}/{project_name}"))
}

/// `apps/<app>/overlays/<project>/kustomization.yaml`
pub fn overlay_kustomization(app_name: &str, project_name: &str) -> PathBuf {
    overlay_dir(app_name, project_name).join(KUSTOMIZATION_FILE)
}

/// `apps/<app>/overlays/<project>/config.json`
pub fn overlay_config(app_name: &str, project_name: &str) -> PathBuf {
    overlay_dir(app_name, project_name).join(CONFIG_FILE)
}

/// `apps/<app>/overlays/<project>/namespace.yaml`
pub fn overlay_namespace(app_name: &str, project_name: &str) -> PathBuf {
    overlay_dir(app_name, project_name).join(NAMESPACE_FILE)
}

/// `apps/<app>/<project>` - the footprint of an app installed without the
/// base/overlay split (a plain per-project directory of manifests).
pub fn project_dir(app_name: &str, project_name: &str) -> PathBuf {
    PathBuf::from(format!("{APPS_DIR}/{app_name}/{project_name}"))
}

/// Repo-relative source path recorded in the overlay metadata, always
/// slash-separated: `apps/<app>/overlays/<project>`.
pub fn source_path(app_name: &str, project_name: &str) -> String {
    format!("{APPS_DIR}/{app_name}/{OVERLAYS_DIR}/{project_name}")
}
