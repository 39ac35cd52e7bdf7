use kube::core::GroupVersionKind;
use serde::{Deserialize, Serialize};

/// Type fields inlined at the root of every resource document.
///
/// Both fields are optional: items of a list usually omit them, and a
/// document that carries only one of them must still survive a round trip.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TypeMeta {
    #[must_use]
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { api_version: Some(api_version.into()), kind: Some(kind.into()) }
    }

    #[must_use]
    pub fn from_group_version_kind(gvk: &GroupVersionKind) -> Self {
        Self::new(api_version(&gvk.group, &gvk.version), gvk.kind.clone())
    }

    /// Derives the group, version and kind from the inlined type fields.
    ///
    /// Missing fields yield empty strings. An `apiVersion` that is not of the
    /// form `version` or `group/version` contributes nothing, only the kind
    /// is kept.
    #[must_use]
    pub fn group_version_kind(&self) -> GroupVersionKind {
        let kind = self.kind.clone().unwrap_or_default();
        let (group, version) = self
            .api_version
            .as_deref()
            .and_then(split_api_version)
            .unwrap_or_default();
        GroupVersionKind { group: group.to_string(), version: version.to_string(), kind }
    }
}

/// Formats a group and version the way `apiVersion` carries them; the core
/// group has no prefix.
#[must_use]
pub fn api_version(group: &str, version: &str) -> String {
    if group.is_empty() { version.to_string() } else { format!("{group}/{version}") }
}

/// Formats a group, version and kind for messages, e.g. `apps/v1, Kind=Deployment`.
#[must_use]
pub fn display_gvk(gvk: &GroupVersionKind) -> String {
    format!("{}, Kind={}", api_version(&gvk.group, &gvk.version), gvk.kind)
}

fn split_api_version(api_version: &str) -> Option<(&str, &str)> {
    match *api_version.split('/').collect::<Vec<_>>().as_slice() {
        [version] => Some(("", version)),
        [group, version] => Some((group, version)),
        _ => None,
    }
}
