//! Kustomization resource-list documents.
//!
//! Both the shared base and each project overlay are expressed as a
//! kustomization: an ordered list of resource references. A reference is
//! either a path inside the repository (`"../../base"`, `"install.yaml"`),
//! a local directory, or a remote locator such as
//! `github.com/owner/repo/manifests?ref=v1.2.3`.
//!
//! The document shape follows the kustomize wire format so the files we
//! write are directly consumable by kustomize-aware tooling.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::DomainError;

/// Wire-format API version for every kustomization we produce.
pub const KUSTOMIZE_API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";

/// Wire-format kind for every kustomization we produce.
pub const KUSTOMIZE_KIND: &str = "Kustomization";

/// A kustomize resource-list document.
///
/// Only the fields this tool reads or writes are modeled; unknown fields in
/// hand-edited files are ignored on read and never round-tripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Ordered resource references. Never empty for documents built by the
    /// descriptor builder: the first entry is the source reference (base) or
    /// the fixed back-reference `"../../base"` (overlay).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Kustomization {
    /// Build a typed document from an ordered set of resource references.
    pub fn with_resources<I, S>(resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            api_version: KUSTOMIZE_API_VERSION.to_string(),
            kind: KUSTOMIZE_KIND.to_string(),
            resources: resources.into_iter().map(Into::into).collect(),
            namespace: None,
        }
    }

    /// First resource reference, if any.
    pub fn first_resource(&self) -> Option<&str> {
        self.resources.first().map(String::as_str)
    }
}

/// Strictness of the base-collision comparison.
///
/// When an app is installed into a second project, the base already on disk
/// must describe the same application. How "same" is judged is configurable:
///
/// - [`Structural`](Self::Structural): the parsed documents must be fully
///   equal. A re-pinned revision (`?ref=v2` instead of `?ref=v1`) counts as
///   a different application.
/// - [`Location`](Self::Location): only the resource references are
///   compared, after stripping any `?query` suffix, so the same locator at
///   a different pinned revision is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaseMatching {
    #[default]
    Structural,
    Location,
}

impl BaseMatching {
    /// Whether `existing` (read back from disk) matches `desired` under
    /// this policy. A mismatch is a collision.
    pub fn matches(&self, existing: &Kustomization, desired: &Kustomization) -> bool {
        match self {
            Self::Structural => existing == desired,
            Self::Location => {
                existing.resources.len() == desired.resources.len()
                    && existing
                        .resources
                        .iter()
                        .zip(&desired.resources)
                        .all(|(a, b)| resource_location(a) == resource_location(b))
            }
        }
    }
}

impl FromStr for BaseMatching {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structural" | "" => Ok(Self::Structural),
            "location" => Ok(Self::Location),
            other => Err(DomainError::UnknownBaseMatching(other.to_string())),
        }
    }
}

/// Resource reference with any `?query` suffix removed.
fn resource_location(resource: &str) -> &str {
    resource.split_once('?').map_or(resource, |(loc, _)| loc)
}
