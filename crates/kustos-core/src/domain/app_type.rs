//! Application source classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Marker file for a ksonnet source tree (together with
/// [`KSONNET_PARAMS_MARKER`]).
pub const KSONNET_APP_MARKER: &str = "app.yaml";

/// Second ksonnet marker; both must be present as files.
pub const KSONNET_PARAMS_MARKER: &str = "components/params.libsonnet";

/// Marker file for a helm chart.
pub const HELM_MARKER: &str = "Chart.yaml";

/// Kustomize marker files (either spelling) plus the conventional
/// `Kustomization` directory.
pub const KUSTOMIZE_FILE_MARKERS: [&str; 2] = ["kustomization.yaml", "kustomization.yml"];
pub const KUSTOMIZE_DIR_MARKER: &str = "Kustomization";

/// What kind of configuration a source directory contains.
///
/// Classification is duck-typed from the directory's contents; see
/// [`infer_app_type`](crate::application::services::infer_app_type) for the
/// priority chain. `Directory` is the fallback: an opaque tree of static
/// manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    Ksonnet,
    Helm,
    Kustomize,
    Directory,
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ksonnet => "ksonnet",
            Self::Helm => "helm",
            Self::Kustomize => "kustomize",
            Self::Directory => "directory",
        };
        write!(f, "{label}")
    }
}

impl FromStr for AppType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ksonnet" => Ok(Self::Ksonnet),
            "helm" => Ok(Self::Helm),
            "kustomize" => Ok(Self::Kustomize),
            "directory" => Ok(Self::Directory),
            other => Err(DomainError::UnknownAppType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for t in [AppType::Ksonnet, AppType::Helm, AppType::Kustomize, AppType::Directory] {
            assert_eq!(t.to_string().parse::<AppType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "jsonnet".parse::<AppType>().unwrap_err();
        assert!(err.to_string().contains("jsonnet"));
    }
}
