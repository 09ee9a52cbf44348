//! Minimal Kubernetes object types.
//!
//! Only the shapes this tool writes are modeled. Full client types are out
//! of scope; the generated documents just need to be valid on the wire.

use serde::{Deserialize, Serialize};

/// A namespace document, written beside an overlay when the app targets a
/// namespace other than the cluster default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
}

/// Build a namespace document for `name`.
pub fn generate_namespace(name: impl Into<String>) -> Namespace {
    Namespace {
        api_version: "v1".to_string(),
        kind: "Namespace".to_string(),
        metadata: ObjectMeta { name: name.into() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_namespace_carries_name() {
        let ns = generate_namespace("team-a");
        assert_eq!(ns.api_version, "v1");
        assert_eq!(ns.kind, "Namespace");
        assert_eq!(ns.metadata.name, "team-a");
    }

    #[test]
    fn serializes_in_wire_format() {
        let yaml = serde_yaml::to_string(&generate_namespace("team-a")).unwrap();
        assert!(yaml.contains("apiVersion: v1"));
        assert!(yaml.contains("kind: Namespace"));
        assert!(yaml.contains("name: team-a"));
    }
}
