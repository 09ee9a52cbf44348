//! Per-overlay application metadata.

use serde::{Deserialize, Serialize};

/// The durable record of where an installed application came from,
/// persisted as `config.json` beside each overlay and consumed by sync
/// tooling outside this crate. Field names are part of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    pub app_name: String,

    /// Display name; equals `app_name` unless the caller renamed the app.
    pub user_given_name: String,

    /// Repo-relative path of the overlay this record sits in, always
    /// slash-separated (`apps/<app>/overlays/<project>`).
    pub source_path: String,

    #[serde(rename = "sourceRepoURL", default, skip_serializing_if = "String::is_empty")]
    pub source_repo_url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_target_revision: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_server: Option<String>,
}
