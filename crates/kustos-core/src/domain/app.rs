//! Application descriptors and creation options.
//!
//! An [`AppDescriptor`] is the fully-resolved, in-memory picture of one
//! application installation: the shared base document, the per-project
//! overlay document, the optional rendered manifest and namespace, and the
//! metadata record. Descriptors are built once, validated, and then handed
//! to the materializer; nothing in this module touches a filesystem.
//!
//! ## Invariants
//!
//! - `base.resources` is never empty: the first entry is the raw source
//!   specifier (normal mode) or the literal `"install.yaml"` (flat mode).
//! - `overlay.resources[0]` is always `"../../base"`, independent of where
//!   the repository is rooted.
//! - `manifests` and `namespace` are gated on flat mode; both are `None`
//!   under normal mode.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;
use super::kube::Namespace;
use super::kustomization::Kustomization;
use super::metadata::AppMetadata;

/// How an application's source is wired into its base.
///
/// Normal references the source location directly from the base
/// kustomization; flat pre-renders the source into a static manifest that
/// is committed next to the base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstallationMode {
    #[default]
    Normal,
    Flat,
}

impl InstallationMode {
    pub const NORMAL: &str = "normal";
    pub const FLAT: &str = "flat";
}

impl fmt::Display for InstallationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "{}", Self::NORMAL),
            Self::Flat => write!(f, "{}", Self::FLAT),
        }
    }
}

impl FromStr for InstallationMode {
    type Err = DomainError;

    /// The empty string selects the default mode so callers can pass
    /// options through from optional flags verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | Self::NORMAL => Ok(Self::Normal),
            Self::FLAT => Ok(Self::Flat),
            other => Err(DomainError::UnknownInstallationMode(other.to_string())),
        }
    }
}

/// Caller-supplied options for installing an application.
///
/// The installation mode stays a plain string at this boundary; it is
/// parsed during descriptor building so unknown values surface as
/// [`DomainError::UnknownInstallationMode`] with the offending value intact.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Where the application's configuration comes from: a path, a git
    /// locator, or any opaque reference kustomize understands.
    pub app_specifier: String,

    /// Name of the application; becomes the directory under `apps/`.
    pub app_name: String,

    /// Kubernetes namespace the app should deploy into, if any.
    pub dest_namespace: Option<String>,

    /// Destination cluster API server recorded in the metadata, if any.
    pub dest_server: Option<String>,

    /// `"normal"`, `"flat"`, or empty for the default.
    pub installation_mode: String,
}

/// Validate creation inputs in a fixed order so callers always see the
/// first missing field: specifier, then name, then project.
pub fn validate_create(opts: &CreateOptions, project_name: &str) -> Result<(), DomainError> {
    if opts.app_specifier.is_empty() {
        return Err(DomainError::EmptyAppSpecifier);
    }
    if opts.app_name.is_empty() {
        return Err(DomainError::EmptyAppName);
    }
    if project_name.is_empty() {
        return Err(DomainError::EmptyProjectName);
    }
    Ok(())
}

/// The resolved unit of configuration for one application installation.
///
/// Built by
/// [`InstallService::describe`](crate::application::services::InstallService::describe),
/// consumed by
/// [`InstallService::materialize`](crate::application::services::InstallService::materialize).
#[derive(Debug, Clone)]
pub struct AppDescriptor {
    pub(crate) name: String,
    pub(crate) user_given_name: String,
    pub(crate) mode: InstallationMode,
    pub(crate) base: Kustomization,
    pub(crate) overlay: Kustomization,
    pub(crate) manifests: Option<Vec<u8>>,
    pub(crate) namespace: Option<Namespace>,
    pub(crate) metadata: AppMetadata,
}

impl AppDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_given_name(&self) -> &str {
        &self.user_given_name
    }

    pub fn mode(&self) -> InstallationMode {
        self.mode
    }

    /// The shared base document, written once per app name.
    pub fn base(&self) -> &Kustomization {
        &self.base
    }

    /// The per-project overlay document.
    pub fn overlay(&self) -> &Kustomization {
        &self.overlay
    }

    /// Rendered manifest bytes; present only under flat mode.
    pub fn manifests(&self) -> Option<&[u8]> {
        self.manifests.as_deref()
    }

    /// Namespace document; present only under flat mode with a destination
    /// namespace set.
    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    /// The metadata record persisted as `config.json`.
    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }
}
