//! In-memory repository filesystem for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use kustos_core::{
    application::{ApplicationError, ports::RepoFs},
    error::KustosResult,
};

/// In-memory repository filesystem.
///
/// Stores files and directories under normalized slash-separated keys.
/// Cloning (and `chroot`) shares the underlying tree, so a test can write
/// through a scoped view and assert through the root.
#[derive(Debug, Clone)]
pub struct MemoryRepoFs {
    inner: Arc<RwLock<MemoryRepoFsInner>>,
    prefix: String,
}

#[derive(Debug, Default)]
struct MemoryRepoFsInner {
    files: BTreeMap<String, Vec<u8>>,
    directories: BTreeSet<String>,
}

impl MemoryRepoFs {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryRepoFsInner::default())),
            prefix: String::new(),
        }
    }

    /// Read a file as UTF-8 (testing helper).
    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let raw = inner.files.get(&self.key(path))?;
        String::from_utf8(raw.clone()).ok()
    }

    /// All file keys under this view, sorted (testing helper).
    pub fn paths(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap();
        inner
            .files
            .keys()
            .filter(|k| self.prefix.is_empty() || k.starts_with(&format!("{}/", self.prefix)))
            .cloned()
            .collect()
    }

    /// Slash-joined key of `path` under this view's prefix.
    fn key(&self, path: &Path) -> String {
        let tail = normalize(path);
        match (self.prefix.is_empty(), tail.is_empty()) {
            (true, _) => tail,
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}/{}", self.prefix, tail),
        }
    }

    /// Absolute form of a key, for error messages.
    fn absolute(&self, path: &Path) -> PathBuf {
        Path::new("/").join(self.key(path))
    }
}

impl Default for MemoryRepoFs {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoFs for MemoryRepoFs {
    fn root(&self) -> PathBuf {
        Path::new("/").join(&self.prefix)
    }

    fn chroot(&self, prefix: &Path) -> KustosResult<Box<dyn RepoFs>> {
        Ok(Box::new(Self {
            inner: Arc::clone(&self.inner),
            prefix: self.key(prefix),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        let key = self.key(path);
        if key.is_empty() {
            return true;
        }
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(&key) || inner.directories.contains(&key)
    }

    fn is_file(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(&self.key(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let key = self.key(path);
        if key.is_empty() {
            return true;
        }
        let inner = self.inner.read().unwrap();
        inner.directories.contains(&key)
    }

    fn read(&self, path: &Path) -> KustosResult<Vec<u8>> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        inner
            .files
            .get(&self.key(path))
            .cloned()
            .ok_or_else(|| {
                ApplicationError::Filesystem {
                    path: self.absolute(path),
                    reason: "file not found".to_string(),
                }
                .into()
            })
    }

    fn write(&self, path: &Path, data: &[u8]) -> KustosResult<()> {
        let key = self.key(path);
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        if let Some((parent, _)) = key.rsplit_once('/') {
            insert_dir_chain(&mut inner.directories, parent);
        }
        inner.files.insert(key, data.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> KustosResult<()> {
        let key = self.key(path);
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        insert_dir_chain(&mut inner.directories, &key);
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> KustosResult<()> {
        let key = self.key(path);
        let subtree = format!("{}/", key);
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        inner
            .files
            .retain(|k, _| k != &key && !k.starts_with(&subtree));
        inner
            .directories
            .retain(|k| k != &key && !k.starts_with(&subtree));
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> KustosResult<Vec<String>> {
        let key = self.key(path);
        let inner = self.inner.read().map_err(|_| lock_error(path))?;

        if !key.is_empty() && !inner.directories.contains(&key) {
            return Err(ApplicationError::Filesystem {
                path: self.absolute(path),
                reason: "directory not found".to_string(),
            }
            .into());
        }

        let subtree = if key.is_empty() {
            String::new()
        } else {
            format!("{}/", key)
        };
        let mut names = BTreeSet::new();
        for candidate in inner.files.keys().chain(inner.directories.iter()) {
            if let Some(rest) = candidate.strip_prefix(&subtree) {
                if rest.is_empty() {
                    continue;
                }
                let child = match rest.split_once('/') {
                    Some((first, _)) => first,
                    None => rest,
                };
                names.insert(child.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }
}

/// Slash-joined normal components; drops roots and `.` segments.
fn normalize(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Register `key` and every ancestor as directories.
fn insert_dir_chain(directories: &mut BTreeSet<String>, key: &str) {
    let mut current = String::new();
    for part in key.split('/').filter(|p| !p.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(part);
        directories.insert(current.clone());
    }
}

fn lock_error(path: &Path) -> kustos_core::error::KustosError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: "filesystem lock poisoned".to_string(),
    }
    .into()
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
