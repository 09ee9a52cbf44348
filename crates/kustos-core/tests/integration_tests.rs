//! Integration tests for kustos-core.
//!
//! Drive the services end to end against the in-memory repository
//! filesystem from kustos-adapters and assert on the files they leave
//! behind.

use std::path::{Path, PathBuf};

use kustos_adapters::MemoryRepoFs;
use kustos_core::{
    application::{
        ApplicationError, InstallService, delete_from_project, infer_app_type, list_apps,
        ports::{ManifestRenderer, RepoFs},
    },
    domain::{AppType, BaseMatching, CreateOptions, DomainError, Kustomization},
    error::{KustosError, KustosResult},
};

const REPO_URL: &str = "https://github.com/owner/gitops";
const REVISION: &str = "main";
const SPECIFIER: &str = "github.com/owner/repo/manifests?ref=v1";

// -------------------------------------------------------------------------
// Test doubles
// -------------------------------------------------------------------------

/// Renderer returning fixed manifest bytes.
struct StaticRenderer(Vec<u8>);

impl ManifestRenderer for StaticRenderer {
    fn render(&self, _: &Kustomization) -> KustosResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// Filesystem that fails writes to paths ending in `fail_suffix`.
struct FailingFs {
    inner: MemoryRepoFs,
    fail_suffix: &'static str,
}

impl RepoFs for FailingFs {
    fn root(&self) -> PathBuf {
        self.inner.root()
    }

    fn chroot(&self, prefix: &Path) -> KustosResult<Box<dyn RepoFs>> {
        self.inner.chroot(prefix)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn read(&self, path: &Path) -> KustosResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> KustosResult<()> {
        if path.to_string_lossy().ends_with(self.fail_suffix) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "permission denied".to_string(),
            }
            .into());
        }
        self.inner.write(path, data)
    }

    fn create_dir_all(&self, path: &Path) -> KustosResult<()> {
        self.inner.create_dir_all(path)
    }

    fn remove_all(&self, path: &Path) -> KustosResult<()> {
        self.inner.remove_all(path)
    }

    fn read_dir(&self, path: &Path) -> KustosResult<Vec<String>> {
        self.inner.read_dir(path)
    }
}

// -------------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------------

fn options(specifier: &str, name: &str, mode: &str) -> CreateOptions {
    CreateOptions {
        app_specifier: specifier.to_string(),
        app_name: name.to_string(),
        installation_mode: mode.to_string(),
        ..Default::default()
    }
}

fn service() -> InstallService {
    InstallService::new(Box::new(StaticRenderer(Vec::new())))
}

/// Install `name` on `project` in normal mode with the default specifier.
fn install(repofs: &dyn RepoFs, name: &str, project: &str) {
    let svc = service();
    let app = svc
        .describe(&options(SPECIFIER, name, ""), project, REPO_URL, REVISION)
        .unwrap();
    svc.materialize(repofs, &app, project).unwrap();
}

fn parse_yaml(repofs: &MemoryRepoFs, path: &str) -> Kustomization {
    serde_yaml::from_str(&repofs.read_to_string(Path::new(path)).unwrap()).unwrap()
}

// -------------------------------------------------------------------------
// Install
// -------------------------------------------------------------------------

#[test]
fn normal_install_writes_the_expected_tree() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    assert_eq!(
        repofs.paths(),
        vec![
            "apps/demo/base/kustomization.yaml",
            "apps/demo/overlays/prod/config.json",
            "apps/demo/overlays/prod/kustomization.yaml",
        ]
    );

    let base = parse_yaml(&repofs, "apps/demo/base/kustomization.yaml");
    assert_eq!(base.api_version, "kustomize.config.k8s.io/v1beta1");
    assert_eq!(base.kind, "Kustomization");
    assert_eq!(base.resources, vec![SPECIFIER.to_string()]);

    let overlay = parse_yaml(&repofs, "apps/demo/overlays/prod/kustomization.yaml");
    assert_eq!(overlay.resources, vec!["../../base".to_string()]);

    let config: serde_json::Value = serde_json::from_str(
        &repofs
            .read_to_string(Path::new("apps/demo/overlays/prod/config.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(config["appName"], "demo");
    assert_eq!(config["userGivenName"], "demo");
    assert_eq!(config["sourcePath"], "apps/demo/overlays/prod");
    assert_eq!(config["sourceRepoURL"], REPO_URL);
    assert_eq!(config["sourceTargetRevision"], REVISION);
}

#[test]
fn flat_install_writes_manifests_and_namespace() {
    let repofs = MemoryRepoFs::new();
    let svc = InstallService::new(Box::new(StaticRenderer(b"kind: Deployment\n".to_vec())));

    let mut opts = options("./manifests", "demo", "flat");
    opts.dest_namespace = Some("prod-ns".to_string());
    let app = svc.describe(&opts, "prod", REPO_URL, REVISION).unwrap();
    svc.materialize(&repofs, &app, "prod").unwrap();

    assert_eq!(
        repofs.paths(),
        vec![
            "apps/demo/base/install.yaml",
            "apps/demo/base/kustomization.yaml",
            "apps/demo/overlays/prod/config.json",
            "apps/demo/overlays/prod/kustomization.yaml",
            "apps/demo/overlays/prod/namespace.yaml",
        ]
    );

    assert_eq!(
        repofs.read_to_string(Path::new("apps/demo/base/install.yaml")),
        Some("kind: Deployment\n".to_string())
    );

    let base = parse_yaml(&repofs, "apps/demo/base/kustomization.yaml");
    assert_eq!(base.resources, vec!["install.yaml".to_string()]);

    let overlay = parse_yaml(&repofs, "apps/demo/overlays/prod/kustomization.yaml");
    assert_eq!(
        overlay.resources,
        vec!["../../base".to_string(), "namespace.yaml".to_string()]
    );

    let namespace: serde_yaml::Value = serde_yaml::from_str(
        &repofs
            .read_to_string(Path::new("apps/demo/overlays/prod/namespace.yaml"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(namespace["apiVersion"], "v1");
    assert_eq!(namespace["kind"], "Namespace");
    assert_eq!(namespace["metadata"]["name"], "prod-ns");
}

#[test]
fn second_project_reuses_the_existing_base() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");
    let base_before = repofs.read_to_string(Path::new("apps/demo/base/kustomization.yaml"));

    install(&repofs, "demo", "staging");

    assert_eq!(
        repofs.read_to_string(Path::new("apps/demo/base/kustomization.yaml")),
        base_before
    );
    assert!(repofs.is_file(Path::new("apps/demo/overlays/prod/kustomization.yaml")));
    assert!(repofs.is_file(Path::new("apps/demo/overlays/staging/kustomization.yaml")));
}

#[test]
fn reinstalling_on_the_same_project_fails() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    let svc = service();
    let app = svc
        .describe(&options(SPECIFIER, "demo", ""), "prod", REPO_URL, REVISION)
        .unwrap();
    let err = svc.materialize(&repofs, &app, "prod").unwrap_err();

    assert!(matches!(
        err,
        KustosError::Domain(DomainError::AppAlreadyInstalledOnProject)
    ));
}

#[test]
fn installing_a_different_base_under_the_same_name_collides() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    let svc = service();
    let app = svc
        .describe(
            &options("github.com/other/repo/path?ref=v9", "demo", ""),
            "staging",
            REPO_URL,
            REVISION,
        )
        .unwrap();
    let err = svc.materialize(&repofs, &app, "staging").unwrap_err();

    assert!(matches!(
        err,
        KustosError::Domain(DomainError::AppCollisionWithExistingBase)
    ));
    // nothing was written for the second project
    assert!(!repofs.exists(Path::new("apps/demo/overlays/staging")));
}

#[test]
fn ref_change_collides_under_structural_matching() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    let svc = service();
    let app = svc
        .describe(
            &options("github.com/owner/repo/manifests?ref=v2", "demo", ""),
            "staging",
            REPO_URL,
            REVISION,
        )
        .unwrap();
    let err = svc.materialize(&repofs, &app, "staging").unwrap_err();

    assert!(matches!(
        err,
        KustosError::Domain(DomainError::AppCollisionWithExistingBase)
    ));
}

#[test]
fn ref_change_is_tolerated_under_location_matching() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    let svc = service().with_base_matching(BaseMatching::Location);
    let app = svc
        .describe(
            &options("github.com/owner/repo/manifests?ref=v2", "demo", ""),
            "staging",
            REPO_URL,
            REVISION,
        )
        .unwrap();
    svc.materialize(&repofs, &app, "staging").unwrap();

    // the shared base keeps its original pin
    let base = parse_yaml(&repofs, "apps/demo/base/kustomization.yaml");
    assert_eq!(base.resources, vec![SPECIFIER.to_string()]);
    assert!(repofs.is_file(Path::new("apps/demo/overlays/staging/kustomization.yaml")));
}

#[test]
fn base_write_failure_names_the_logical_file() {
    let repofs = FailingFs {
        inner: MemoryRepoFs::new(),
        fail_suffix: "base/kustomization.yaml",
    };

    let svc = service();
    let app = svc
        .describe(&options(SPECIFIER, "demo", ""), "prod", REPO_URL, REVISION)
        .unwrap();
    let err = svc.materialize(&repofs, &app, "prod").unwrap_err();

    assert!(err.to_string().contains("failed to create 'base' file at"));
    assert!(err.to_string().contains("permission denied"));
    assert!(err.is_retryable());
}

#[test]
fn config_write_failure_names_the_logical_file() {
    let repofs = FailingFs {
        inner: MemoryRepoFs::new(),
        fail_suffix: "config.json",
    };

    let svc = service();
    let app = svc
        .describe(&options(SPECIFIER, "demo", ""), "prod", REPO_URL, REVISION)
        .unwrap();
    let err = svc.materialize(&repofs, &app, "prod").unwrap_err();

    assert!(err.to_string().contains("failed to create 'config' file at"));
    // earlier steps still landed; a retry would pick up where this left off
    assert!(repofs.inner.is_file(Path::new("apps/demo/base/kustomization.yaml")));
    assert!(
        repofs
            .inner
            .is_file(Path::new("apps/demo/overlays/prod/kustomization.yaml"))
    );
}

// -------------------------------------------------------------------------
// Prune
// -------------------------------------------------------------------------

#[test]
fn removing_the_last_overlay_removes_the_whole_app() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    delete_from_project(&repofs, "demo", "prod").unwrap();

    assert!(!repofs.exists(Path::new("apps/demo")));
    assert!(repofs.paths().is_empty());
}

#[test]
fn removing_one_overlay_keeps_the_others_and_the_base() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");
    install(&repofs, "demo", "staging");

    delete_from_project(&repofs, "demo", "prod").unwrap();

    assert!(!repofs.exists(Path::new("apps/demo/overlays/prod")));
    assert!(repofs.is_file(Path::new("apps/demo/overlays/staging/kustomization.yaml")));
    assert!(repofs.is_file(Path::new("apps/demo/base/kustomization.yaml")));
}

#[test]
fn removing_an_absent_app_is_a_noop() {
    let repofs = MemoryRepoFs::new();
    delete_from_project(&repofs, "demo", "prod").unwrap();
    assert!(repofs.paths().is_empty());
}

#[test]
fn removing_an_absent_project_is_a_noop() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");

    delete_from_project(&repofs, "demo", "staging").unwrap();

    assert!(repofs.is_file(Path::new("apps/demo/overlays/prod/kustomization.yaml")));
}

#[test]
fn directory_layout_apps_prune_per_project_directory() {
    let repofs = MemoryRepoFs::new();
    repofs.write(Path::new("apps/legacy/prod/config.json"), b"{}").unwrap();
    repofs
        .write(Path::new("apps/legacy/staging/config.json"), b"{}")
        .unwrap();

    delete_from_project(&repofs, "legacy", "prod").unwrap();
    assert!(!repofs.exists(Path::new("apps/legacy/prod")));
    assert!(repofs.is_file(Path::new("apps/legacy/staging/config.json")));

    delete_from_project(&repofs, "legacy", "staging").unwrap();
    assert!(!repofs.exists(Path::new("apps/legacy")));
}

// -------------------------------------------------------------------------
// Inference
// -------------------------------------------------------------------------

#[test]
fn empty_directory_infers_as_directory() {
    let repofs = MemoryRepoFs::new();
    assert_eq!(infer_app_type(&repofs), AppType::Directory);
}

#[test]
fn ksonnet_needs_both_marker_files() {
    let repofs = MemoryRepoFs::new();
    repofs.write(Path::new("app.yaml"), b"").unwrap();
    repofs
        .write(Path::new("components/params.libsonnet"), b"")
        .unwrap();
    assert_eq!(infer_app_type(&repofs), AppType::Ksonnet);

    let partial = MemoryRepoFs::new();
    partial.write(Path::new("app.yaml"), b"").unwrap();
    assert_eq!(infer_app_type(&partial), AppType::Directory);

    let params_only = MemoryRepoFs::new();
    params_only
        .write(Path::new("components/params.libsonnet"), b"")
        .unwrap();
    assert_eq!(infer_app_type(&params_only), AppType::Directory);
}

#[test]
fn chart_marker_infers_as_helm() {
    let repofs = MemoryRepoFs::new();
    repofs.write(Path::new("Chart.yaml"), b"").unwrap();
    assert_eq!(infer_app_type(&repofs), AppType::Helm);
}

#[test]
fn kustomization_markers_infer_as_kustomize() {
    for marker in ["kustomization.yaml", "kustomization.yml"] {
        let repofs = MemoryRepoFs::new();
        repofs.write(Path::new(marker), b"").unwrap();
        assert_eq!(infer_app_type(&repofs), AppType::Kustomize, "{marker}");
    }

    let dir_marker = MemoryRepoFs::new();
    dir_marker.create_dir_all(Path::new("Kustomization")).unwrap();
    assert_eq!(infer_app_type(&dir_marker), AppType::Kustomize);
}

#[test]
fn marker_file_and_directory_roles_do_not_swap() {
    // a directory named like the marker file is not a kustomize app
    let dir = MemoryRepoFs::new();
    dir.create_dir_all(Path::new("kustomization.yaml")).unwrap();
    assert_eq!(infer_app_type(&dir), AppType::Directory);

    // and a file named like the marker directory is not either
    let file = MemoryRepoFs::new();
    file.write(Path::new("Kustomization"), b"").unwrap();
    assert_eq!(infer_app_type(&file), AppType::Directory);
}

#[test]
fn inference_priority_is_ksonnet_then_helm_then_kustomize() {
    let repofs = MemoryRepoFs::new();
    repofs.write(Path::new("app.yaml"), b"").unwrap();
    repofs
        .write(Path::new("components/params.libsonnet"), b"")
        .unwrap();
    repofs.write(Path::new("Chart.yaml"), b"").unwrap();
    repofs.write(Path::new("kustomization.yaml"), b"").unwrap();
    assert_eq!(infer_app_type(&repofs), AppType::Ksonnet);

    let helm_and_kustomize = MemoryRepoFs::new();
    helm_and_kustomize.write(Path::new("Chart.yaml"), b"").unwrap();
    helm_and_kustomize
        .write(Path::new("kustomization.yaml"), b"")
        .unwrap();
    assert_eq!(infer_app_type(&helm_and_kustomize), AppType::Helm);
}

// -------------------------------------------------------------------------
// Listing
// -------------------------------------------------------------------------

#[test]
fn lists_apps_with_their_projects() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");
    install(&repofs, "demo", "staging");
    install(&repofs, "other", "prod");

    let apps = list_apps(&repofs, None).unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0].name, "demo");
    assert_eq!(apps[0].projects, vec!["prod", "staging"]);
    assert_eq!(apps[1].name, "other");
    assert_eq!(apps[1].projects, vec!["prod"]);
}

#[test]
fn filters_the_listing_by_project() {
    let repofs = MemoryRepoFs::new();
    install(&repofs, "demo", "prod");
    install(&repofs, "demo", "staging");
    install(&repofs, "other", "prod");

    let apps = list_apps(&repofs, Some("staging")).unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].name, "demo");
}

#[test]
fn empty_repository_lists_nothing() {
    let repofs = MemoryRepoFs::new();
    assert!(list_apps(&repofs, None).unwrap().is_empty());
}

#[test]
fn directory_layout_apps_list_their_project_directories() {
    let repofs = MemoryRepoFs::new();
    repofs.write(Path::new("apps/legacy/prod/config.json"), b"{}").unwrap();
    repofs
        .write(Path::new("apps/legacy/staging/config.json"), b"{}")
        .unwrap();

    let apps = list_apps(&repofs, None).unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].name, "legacy");
    assert_eq!(apps[0].projects, vec!["prod", "staging"]);
}
