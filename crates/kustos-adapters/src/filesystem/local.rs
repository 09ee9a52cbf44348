//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use kustos_core::{application::ports::RepoFs, error::KustosResult};

/// Production repository filesystem rooted at a checkout directory.
///
/// All trait paths are resolved against the root, so the services can work
/// in repository-relative terms while errors report absolute paths.
#[derive(Debug, Clone)]
pub struct LocalRepoFs {
    root: PathBuf,
}

impl LocalRepoFs {
    /// Create a filesystem rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl RepoFs for LocalRepoFs {
    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    fn chroot(&self, prefix: &Path) -> KustosResult<Box<dyn RepoFs>> {
        Ok(Box::new(Self::new(self.resolve(prefix))))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn read(&self, path: &Path) -> KustosResult<Vec<u8>> {
        let full = self.resolve(path);
        std::fs::read(&full).map_err(|e| map_io_error(&full, e, "read file"))
    }

    fn write(&self, path: &Path, data: &[u8]) -> KustosResult<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::write(&full, data).map_err(|e| map_io_error(&full, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> KustosResult<()> {
        let full = self.resolve(path);
        std::fs::create_dir_all(&full).map_err(|e| map_io_error(&full, e, "create directory"))
    }

    fn remove_all(&self, path: &Path) -> KustosResult<()> {
        let full = self.resolve(path);
        if !full.exists() {
            return Ok(());
        }
        if full.is_dir() {
            std::fs::remove_dir_all(&full).map_err(|e| map_io_error(&full, e, "remove directory"))
        } else {
            std::fs::remove_file(&full).map_err(|e| map_io_error(&full, e, "remove file"))
        }
    }

    fn read_dir(&self, path: &Path) -> KustosResult<Vec<String>> {
        let full = self.resolve(path);
        let entries =
            std::fs::read_dir(&full).map_err(|e| map_io_error(&full, e, "read directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(&full, e, "read directory"))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> kustos_core::error::KustosError {
    use kustos_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("failed to {}: {}", operation, e),
    }
    .into()
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, LocalRepoFs) {
        let temp = TempDir::new().unwrap();
        let repofs = LocalRepoFs::new(temp.path());
        (temp, repofs)
    }

    #[test]
    fn write_creates_missing_parents() {
        let (temp, repofs) = fixture();
        repofs
            .write(Path::new("apps/name/base/kustomization.yaml"), b"resources:")
            .unwrap();

        let on_disk = temp.path().join("apps/name/base/kustomization.yaml");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"resources:");
    }

    #[test]
    fn read_round_trips_written_bytes() {
        let (_temp, repofs) = fixture();
        repofs.write(Path::new("file.yaml"), b"a: 1\n").unwrap();
        assert_eq!(repofs.read(Path::new("file.yaml")).unwrap(), b"a: 1\n");
    }

    #[test]
    fn read_missing_file_reports_the_path() {
        let (_temp, repofs) = fixture();
        let err = repofs.read(Path::new("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
        assert!(err.is_retryable());
    }

    #[test]
    fn write_if_missing_never_clobbers() {
        let (_temp, repofs) = fixture();
        let path = Path::new("apps/name/base/kustomization.yaml");

        assert!(!repofs.write_if_missing(path, b"first").unwrap());
        assert!(repofs.write_if_missing(path, b"second").unwrap());
        assert_eq!(repofs.read(path).unwrap(), b"first");
    }

    #[test]
    fn is_file_and_is_dir_are_distinct() {
        let (_temp, repofs) = fixture();
        repofs.write(Path::new("dir/file.yaml"), b"x").unwrap();

        assert!(repofs.is_file(Path::new("dir/file.yaml")));
        assert!(!repofs.is_dir(Path::new("dir/file.yaml")));
        assert!(repofs.is_dir(Path::new("dir")));
        assert!(!repofs.is_file(Path::new("dir")));
        assert!(repofs.exists(Path::new("dir")));
    }

    #[test]
    fn read_dir_returns_sorted_names() {
        let (_temp, repofs) = fixture();
        repofs.write(Path::new("apps/zeta/file"), b"").unwrap();
        repofs.write(Path::new("apps/alpha/file"), b"").unwrap();
        repofs.create_dir_all(Path::new("apps/mid")).unwrap();

        assert_eq!(
            repofs.read_dir(Path::new("apps")).unwrap(),
            vec!["alpha", "mid", "zeta"]
        );
    }

    #[test]
    fn remove_all_on_absent_path_is_ok() {
        let (_temp, repofs) = fixture();
        repofs.remove_all(Path::new("not/there")).unwrap();
    }

    #[test]
    fn remove_all_deletes_a_subtree() {
        let (temp, repofs) = fixture();
        repofs.write(Path::new("apps/name/base/file"), b"").unwrap();
        repofs.write(Path::new("apps/other/file"), b"").unwrap();

        repofs.remove_all(Path::new("apps/name")).unwrap();

        assert!(!temp.path().join("apps/name").exists());
        assert!(temp.path().join("apps/other/file").exists());
    }

    #[test]
    fn chroot_scopes_all_operations() {
        let (temp, repofs) = fixture();
        let scoped = repofs.chroot(Path::new("apps")).unwrap();
        scoped.write(Path::new("name/file"), b"x").unwrap();

        assert!(temp.path().join("apps/name/file").exists());
        assert_eq!(scoped.root(), temp.path().join("apps"));
    }
}
