//! Install service - descriptor building and materialization.
//!
//! This service owns the two halves of installing an application:
//! 1. `describe` - pure construction of an [`AppDescriptor`] from caller
//!    options (renders flat manifests through the renderer port, touches
//!    no filesystem).
//! 2. `materialize` - writes the descriptor's file set into the repository
//!    tree with collision and idempotency checks.
//!
//! The split keeps validation and rendering failures separate from tree
//! state: a descriptor that built successfully can be materialized into any
//! project, and re-materialization is rejected rather than silently
//! overwriting.

use std::path::Path;
use tracing::{debug, info, instrument};

use super::io_reason;
use crate::{
    application::{
        ApplicationError,
        ports::{ManifestRenderer, RepoFs},
    },
    domain::{
        AppDescriptor, AppMetadata, BaseMatching, CreateOptions, DomainError, InstallationMode,
        Kustomization, generate_namespace, layout, validate_create,
    },
    error::KustosResult,
};

/// Orchestrates application installation.
pub struct InstallService {
    renderer: Box<dyn ManifestRenderer>,
    base_matching: BaseMatching,
}

impl InstallService {
    /// Create a new install service with the given renderer adapter.
    pub fn new(renderer: Box<dyn ManifestRenderer>) -> Self {
        Self {
            renderer,
            base_matching: BaseMatching::default(),
        }
    }

    /// Override the base-collision comparison policy.
    pub fn with_base_matching(mut self, policy: BaseMatching) -> Self {
        self.base_matching = policy;
        self
    }

    /// Build the in-memory descriptor for one application installation.
    ///
    /// Validation runs in a fixed order (specifier, name, project, mode) so
    /// callers always see the first problem. Under flat mode the renderer
    /// port is invoked exactly once, here; a rendering failure surfaces as
    /// an error naming the failing source specifier.
    #[instrument(skip_all, fields(app = %opts.app_name, project = %project_name))]
    pub fn describe(
        &self,
        opts: &CreateOptions,
        project_name: &str,
        repo_url: &str,
        target_revision: &str,
    ) -> KustosResult<AppDescriptor> {
        // 1. Validate inputs
        validate_create(opts, project_name)?;
        let mode: InstallationMode = opts.installation_mode.parse()?;

        // 2. Flat mode resolves the source into static manifests now
        let manifests = match mode {
            InstallationMode::Flat => {
                info!(specifier = %opts.app_specifier, "building manifests");
                let source = Kustomization::with_resources([opts.app_specifier.as_str()]);
                let rendered =
                    self.renderer
                        .render(&source)
                        .map_err(|e| ApplicationError::Render {
                            specifier: opts.app_specifier.clone(),
                            reason: io_reason(&e),
                        })?;
                Some(rendered)
            }
            InstallationMode::Normal => None,
        };

        // 3. Base: first resource is the source reference, or the static
        //    manifest filename under flat mode
        let base = match mode {
            InstallationMode::Flat => Kustomization::with_resources([layout::INSTALL_FILE]),
            InstallationMode::Normal => {
                Kustomization::with_resources([opts.app_specifier.as_str()])
            }
        };

        // 4. Overlay: fixed back-reference, plus the namespace document
        //    when a flat install targets a namespace
        let dest_namespace = opts.dest_namespace.as_deref().filter(|ns| !ns.is_empty());
        let mut overlay = Kustomization::with_resources([layout::BASE_BACK_REF]);
        let namespace = match (mode, dest_namespace) {
            (InstallationMode::Flat, Some(ns)) => {
                overlay.resources.push(layout::NAMESPACE_FILE.to_string());
                Some(generate_namespace(ns))
            }
            _ => None,
        };

        // 5. Metadata record persisted beside the overlay
        let metadata = AppMetadata {
            app_name: opts.app_name.clone(),
            user_given_name: opts.app_name.clone(),
            source_path: layout::source_path(&opts.app_name, project_name),
            source_repo_url: repo_url.to_string(),
            source_target_revision: target_revision.to_string(),
            dest_namespace: dest_namespace.map(str::to_string),
            dest_server: opts.dest_server.clone().filter(|s| !s.is_empty()),
        };

        Ok(AppDescriptor {
            name: opts.app_name.clone(),
            user_given_name: opts.app_name.clone(),
            mode,
            base,
            overlay,
            manifests,
            namespace,
            metadata,
        })
    }

    /// Write the descriptor's file set into the repository tree.
    ///
    /// Ordered steps, each independently safe to retry:
    /// 1. compare any existing base against the descriptor (collision check)
    /// 2. hard-fail if the overlay kustomization already exists
    /// 3. write the base kustomization (no-op when already present)
    /// 4. write `install.yaml` for flat installs
    /// 5. write the overlay kustomization
    /// 6. write `config.json`
    /// 7. write `namespace.yaml` when a namespace is set
    ///
    /// No rollback on failure: a partially-written tree is recoverable
    /// because every step converges on retry.
    #[instrument(skip_all, fields(app = %app.name(), project = %project_name))]
    pub fn materialize(
        &self,
        repofs: &dyn RepoFs,
        app: &AppDescriptor,
        project_name: &str,
    ) -> KustosResult<()> {
        let base_path = layout::base_kustomization(app.name());
        let overlay_path = layout::overlay_kustomization(app.name(), project_name);

        // 1. Collision check against any pre-existing base
        if repofs.exists(&base_path) {
            debug!("application base with the same name exists, checking for collisions");
            let existing = read_kustomization(repofs, &base_path)?;
            if !self.base_matching.matches(&existing, app.base()) {
                return Err(DomainError::AppCollisionWithExistingBase.into());
            }
        }

        // 2. Re-installation into the same project is a hard error, not a
        //    silent overwrite; the caller must delete first
        if repofs.exists(&overlay_path) {
            return Err(DomainError::AppAlreadyInstalledOnProject.into());
        }

        // 3. Base kustomization (shared; may already exist from another project)
        let base_yaml = encode_yaml("app base kustomization", app.base())?;
        if write_file(repofs, &base_path, "base", &base_yaml)? {
            debug!("base kustomization already present, left untouched");
        }

        // 4. Static manifests - flat installation mode only
        if let Some(manifests) = app.manifests() {
            write_file(
                repofs,
                &layout::install_manifest(app.name()),
                "manifests",
                manifests,
            )?;
        }

        // 5. Overlay kustomization
        let overlay_yaml = encode_yaml("app overlay kustomization", app.overlay())?;
        write_file(repofs, &overlay_path, "overlay", &overlay_yaml)?;

        // 6. Metadata record
        let config = serde_json::to_vec(app.metadata()).map_err(|e| ApplicationError::Encode {
            what: "app config",
            reason: e.to_string(),
        })?;
        write_file(
            repofs,
            &layout::overlay_config(app.name(), project_name),
            "config",
            &config,
        )?;

        // 7. Namespace document next to the overlay
        if let Some(namespace) = app.namespace() {
            let ns_yaml = encode_yaml("app namespace", namespace)?;
            write_file(
                repofs,
                &layout::overlay_namespace(app.name(), project_name),
                "namespace",
                &ns_yaml,
            )?;
        }

        info!(app = %app.name(), project = %project_name, "application files written");
        Ok(())
    }
}

// -------------------------------------------------------------------------
// Internal Helpers
// -------------------------------------------------------------------------

/// Write through the create-or-detect-existing primitive, tagging failures
/// with the file's logical name and absolute target path.
fn write_file(repofs: &dyn RepoFs, path: &Path, name: &str, data: &[u8]) -> KustosResult<bool> {
    repofs.write_if_missing(path, data).map_err(|e| {
        ApplicationError::WriteFile {
            name: name.to_string(),
            path: repofs.root().join(path),
            reason: io_reason(&e),
        }
        .into()
    })
}

fn read_kustomization(repofs: &dyn RepoFs, path: &Path) -> KustosResult<Kustomization> {
    let raw = repofs.read(path)?;
    serde_yaml::from_slice(&raw).map_err(|e| {
        ApplicationError::Parse {
            path: repofs.root().join(path),
            reason: e.to_string(),
        }
        .into()
    })
}

fn encode_yaml<T: serde::Serialize>(what: &'static str, value: &T) -> KustosResult<Vec<u8>> {
    serde_yaml::to_string(value)
        .map(String::into_bytes)
        .map_err(|e| {
            ApplicationError::Encode {
                what,
                reason: e.to_string(),
            }
            .into()
        })
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
