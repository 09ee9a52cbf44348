//! Manifest flattening renderer for local YAML sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use kustos_core::{
    application::{ApplicationError, ports::ManifestRenderer},
    domain::Kustomization,
    error::{KustosError, KustosResult},
};

/// Renders a resource list by concatenating the YAML manifests it names.
///
/// Each resource must be a local file or directory. Directories are walked
/// in sorted order and every `.yaml`/`.yml` file is included, so the output
/// is deterministic for a given tree. Documents are joined with `---`
/// separators into one multi-document manifest.
pub struct FlattenRenderer;

impl FlattenRenderer {
    /// Create a new flatten renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlattenRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestRenderer for FlattenRenderer {
    #[instrument(skip_all)]
    fn render(&self, kustomization: &Kustomization) -> KustosResult<Vec<u8>> {
        let mut sources = Vec::new();
        for resource in &kustomization.resources {
            // A `?ref=...` style suffix addresses a revision, not a file
            let location = match resource.split_once('?') {
                Some((path, _)) => path,
                None => resource.as_str(),
            };
            if location.contains("://") {
                return Err(fs_error(
                    Path::new(location),
                    "remote sources cannot be flattened, clone the repository first".to_string(),
                ));
            }

            let path = Path::new(location);
            if path.is_file() {
                sources.push(path.to_path_buf());
            } else if path.is_dir() {
                sources.extend(collect_manifests(path)?);
            } else {
                return Err(fs_error(path, "no such file or directory".to_string()));
            }
        }

        if sources.is_empty() {
            return Err(fs_error(
                Path::new(&kustomization.resources.join(",")),
                "no YAML manifests found".to_string(),
            ));
        }

        debug!(manifests = sources.len(), "flattening manifests");
        let mut output = Vec::new();
        for (i, source) in sources.iter().enumerate() {
            let raw = read_manifest(source)?;
            if i > 0 {
                output.extend_from_slice(b"---\n");
            }
            output.extend_from_slice(&raw);
            if !raw.ends_with(b"\n") {
                output.push(b'\n');
            }
        }
        Ok(output)
    }
}

/// Sorted `.yaml`/`.yml` files under `dir`.
fn collect_manifests(dir: &Path) -> KustosResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry =
            walk_entry.map_err(|e| fs_error(dir, format!("directory walk error: {e}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_yaml_extension(path) {
            continue;
        }
        // kustomization.yaml is build configuration, not a deployable resource
        if is_kustomization_file(path) {
            continue;
        }
        paths.push(path.to_path_buf());
    }
    Ok(paths)
}

/// Read one manifest file, verifying every YAML document in it parses.
fn read_manifest(path: &Path) -> KustosResult<Vec<u8>> {
    let raw =
        std::fs::read(path).map_err(|e| fs_error(path, format!("failed to read file: {e}")))?;
    for document in serde_yaml::Deserializer::from_slice(&raw) {
        serde_yaml::Value::deserialize(document).map_err(|e| {
            fs_error(path, format!("failed to parse YAML: {e}"))
        })?;
    }
    Ok(raw)
}

fn has_yaml_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn is_kustomization_file(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some("kustomization.yaml") | Some("kustomization.yml")
    )
}

fn fs_error(path: &Path, reason: String) -> KustosError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn render_dir(temp: &TempDir) -> KustosResult<Vec<u8>> {
        let source = temp.path().to_string_lossy().into_owned();
        FlattenRenderer::new().render(&Kustomization::with_resources([source.as_str()]))
    }

    #[test]
    fn flattens_directory_in_sorted_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.yaml"), "kind: Service\n").unwrap();
        fs::write(temp.path().join("a.yaml"), "kind: Deployment").unwrap();

        let out = render_dir(&temp).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "kind: Deployment\n---\nkind: Service\n"
        );
    }

    #[test]
    fn renders_a_single_file_resource() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("deploy.yaml");
        fs::write(&file, "kind: Deployment\n").unwrap();

        let source = file.to_string_lossy().into_owned();
        let out = FlattenRenderer::new()
            .render(&Kustomization::with_resources([source.as_str()]))
            .unwrap();
        assert_eq!(out, b"kind: Deployment\n");
    }

    #[test]
    fn walks_nested_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("a.yaml"), "a: 1\n").unwrap();
        fs::write(temp.path().join("sub/b.yaml"), "b: 2\n").unwrap();

        let out = render_dir(&temp).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a: 1\n---\nb: 2\n");
    }

    #[test]
    fn skips_non_yaml_and_kustomization_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.yaml"), "a: 1\n").unwrap();
        fs::write(temp.path().join("kustomization.yaml"), "resources: []\n").unwrap();
        fs::write(temp.path().join("README.md"), "docs\n").unwrap();

        let out = render_dir(&temp).unwrap();
        assert_eq!(out, b"a: 1\n");
    }

    #[test]
    fn strips_a_ref_query_suffix() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.yaml"), "a: 1\n").unwrap();

        let source = format!("{}?ref=v1.2.3", temp.path().to_string_lossy());
        let out = FlattenRenderer::new()
            .render(&Kustomization::with_resources([source.as_str()]))
            .unwrap();
        assert_eq!(out, b"a: 1\n");
    }

    #[test]
    fn missing_source_fails_with_the_path() {
        let err = FlattenRenderer::new()
            .render(&Kustomization::with_resources(["/does/not/exist"]))
            .unwrap_err();
        assert!(err.to_string().contains("/does/not/exist"));
        assert!(err.to_string().contains("no such file or directory"));
    }

    #[test]
    fn remote_source_is_rejected() {
        let err = FlattenRenderer::new()
            .render(&Kustomization::with_resources([
                "https://github.com/owner/repo",
            ]))
            .unwrap_err();
        assert!(err.to_string().contains("remote sources"));
    }

    #[test]
    fn directory_without_manifests_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "docs\n").unwrap();

        let err = render_dir(&temp).unwrap_err();
        assert!(err.to_string().contains("no YAML manifests found"));
    }

    #[test]
    fn invalid_yaml_is_reported_per_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.yaml"), "kind: [unclosed\n").unwrap();

        let err = render_dir(&temp).unwrap_err();
        assert!(err.to_string().contains("failed to parse YAML"));
        assert!(err.to_string().contains("bad.yaml"));
    }
}
