//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`KUSTOS_` prefix, `__` for section nesting,
//!    e.g. `KUSTOS_REPOSITORY__URL`)
//! 3. Config file (`--config`, or the default location)
//! 4. Built-in defaults (always present)
//!
//! The section is called `repository` rather than `repo` so the flat
//! `KUSTOS_REPO` variable (the `--repo` flag's env form) never collides
//! with the nested configuration keys.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::global::GlobalArgs;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The GitOps repository this CLI operates on.
    pub repository: RepositoryConfig,
    /// Default values for new installations.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Checkout path used when `--repo` is not passed.
    pub path: Option<PathBuf>,
    /// Repository URL recorded in each installed application's `config.json`.
    pub url: Option<String>,
    /// Revision recorded in each installed application's `config.json`.
    pub revision: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Cluster URL recorded when `--dest-server` is not passed.
    pub dest_server: Option<String>,
    /// Base collision policy: `structural` or `location`.
    pub base_matching: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            revision: "main".into(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            dest_server: None,
            base_matching: "structural".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A file passed explicitly via `--config` must exist; the default
    /// location is optional and silently skipped when absent.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        let required = config_file.is_some();

        let raw = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix("KUSTOS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to read configuration")?;

        raw.try_deserialize().context("failed to parse configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kustos.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "kustos", "kustos")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kustos.toml"))
    }

    /// Repository checkout to operate on: `--repo` flag, then the
    /// configured path, then the current directory.
    pub fn repo_path(&self, global: &GlobalArgs) -> PathBuf {
        global
            .repo
            .clone()
            .or_else(|| self.repository.path.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_with_repo(repo: Option<&str>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            repo: repo.map(PathBuf::from),
        }
    }

    #[test]
    fn default_revision_is_main() {
        assert_eq!(AppConfig::default().repository.revision, "main");
    }

    #[test]
    fn default_base_matching_is_structural() {
        assert_eq!(AppConfig::default().defaults.base_matching, "structural");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = PathBuf::from("/absolutely/does/not/exist.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn parses_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[repository]
url = "https://github.com/owner/gitops"
revision = "v2"

[defaults]
base_matching = "location"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(
            cfg.repository.url.as_deref(),
            Some("https://github.com/owner/gitops")
        );
        assert_eq!(cfg.repository.revision, "v2");
        assert_eq!(cfg.defaults.base_matching, "location");
        // untouched sections keep their defaults
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn repo_path_prefers_the_flag() {
        let mut cfg = AppConfig::default();
        cfg.repository.path = Some(PathBuf::from("/from/config"));

        let flagged = cfg.repo_path(&global_with_repo(Some("/from/flag")));
        assert_eq!(flagged, PathBuf::from("/from/flag"));

        let configured = cfg.repo_path(&global_with_repo(None));
        assert_eq!(configured, PathBuf::from("/from/config"));

        let fallback = AppConfig::default().repo_path(&global_with_repo(None));
        assert_eq!(fallback, PathBuf::from("."));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
