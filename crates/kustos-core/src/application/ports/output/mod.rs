//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kustos-adapters` crate provides implementations.

use crate::domain::Kustomization;
use crate::error::KustosResult;
use std::path::{Path, PathBuf};

/// Port for repository filesystem operations.
///
/// Implemented by:
/// - `kustos_adapters::filesystem::LocalRepoFs` (production)
/// - `kustos_adapters::filesystem::MemoryRepoFs` (testing)
///
/// ## Design Notes
///
/// - All paths are relative to the repository root the implementation was
///   opened at; `root()` reports that root for error messages.
/// - `write` creates missing parent directories; the tree invariants live
///   in the services, not here.
/// - The design assumes a single writer process per checkout. Nothing here
///   locks; external serialization (commit ordering) is the caller's job.
pub trait RepoFs: Send + Sync {
    /// Absolute root this filesystem is scoped to.
    fn root(&self) -> PathBuf;

    /// A view of the same tree scoped to `prefix`.
    fn chroot(&self, prefix: &Path) -> KustosResult<Box<dyn RepoFs>>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a file's contents.
    fn read(&self, path: &Path) -> KustosResult<Vec<u8>>;

    /// Write a file, creating parent directories as needed.
    fn write(&self, path: &Path, data: &[u8]) -> KustosResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KustosResult<()>;

    /// Remove a file or directory subtree. An absent target is success.
    fn remove_all(&self, path: &Path) -> KustosResult<()>;

    /// Sorted names of the direct children of `path`.
    fn read_dir(&self, path: &Path) -> KustosResult<Vec<String>>;

    /// Create-or-detect-existing write primitive.
    ///
    /// If the target already exists it is left untouched and `true` is
    /// returned; otherwise the data is written and `false` is returned.
    /// Existing content is never clobbered, which makes multi-file write
    /// sequences safe under accidental re-invocation.
    fn write_if_missing(&self, path: &Path, data: &[u8]) -> KustosResult<bool> {
        if self.exists(path) {
            return Ok(true);
        }
        self.write(path, data)?;
        Ok(false)
    }
}

/// Port for rendering a resource list into final manifest bytes.
///
/// Implemented by:
/// - `kustos_adapters::renderer::FlattenRenderer` (local YAML sources)
///
/// Rendering is synchronous; flat installs call it exactly once at
/// descriptor-build time.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestRenderer: Send + Sync {
    /// Render the resources named by `kustomization` into one manifest.
    fn render(&self, kustomization: &Kustomization) -> KustosResult<Vec<u8>>;
}
