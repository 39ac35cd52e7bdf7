use kube::core::{ApiResource, GroupVersionKind};
use podspecable_base::consts::k8s::{LIST_KIND_SUFFIX, workloads};
use serde::{Deserialize, Serialize};

/// A resource kind expected to carry a pod template.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadKind {
    /// API group, empty for the core group.
    #[serde(default)]
    pub group: String,

    pub version: String,

    pub kind: String,

    /// Plural resource name; guessed from `kind` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl WorkloadKind {
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self { group: group.into(), version: version.into(), kind: kind.into(), plural: None }
    }

    #[must_use]
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    #[must_use]
    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.kind)
    }

    /// Group, version and kind of the list returned when listing this kind.
    #[must_use]
    pub fn list_kind(&self) -> GroupVersionKind {
        let kind = format!("{}{LIST_KIND_SUFFIX}", self.kind);
        GroupVersionKind::gvk(&self.group, &self.version, &kind)
    }

    #[must_use]
    pub fn api_resource(&self) -> ApiResource {
        let gvk = self.group_version_kind();
        match self.plural.as_deref() {
            Some(plural) => ApiResource::from_gvk_with_plural(&gvk, plural),
            None => ApiResource::from_gvk(&gvk),
        }
    }

    #[must_use]
    pub fn defaults() -> Vec<Self> {
        let apps = |kind: &str| Self::new(workloads::APPS_GROUP, workloads::APPS_VERSION, kind);
        vec![
            apps(workloads::DEPLOYMENT),
            apps(workloads::REPLICA_SET),
            apps(workloads::DAEMON_SET),
            apps(workloads::STATEFUL_SET),
            Self::new(workloads::BATCH_GROUP, workloads::BATCH_VERSION, workloads::JOB),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_resource_infers_plural() {
        let kind = WorkloadKind::new("apps", "v1", "StatefulSet");
        let resource = kind.api_resource();
        assert_eq!(resource.api_version, "apps/v1");
        assert_eq!(resource.plural, "statefulsets");
    }

    #[test]
    fn test_api_resource_uses_explicit_plural() {
        let kind = WorkloadKind::new("serving.knative.dev", "v1", "Configuration")
            .with_plural("configurations");
        assert_eq!(kind.api_resource().plural, "configurations");
    }

    #[test]
    fn test_core_group_kind() {
        let kind: WorkloadKind = serde_yaml::from_str("version: v1\nkind: ReplicationController\n")
            .expect("Group defaults to the core group");
        assert_eq!(kind.group, "");
        assert_eq!(kind.api_resource().api_version, "v1");
        assert_eq!(kind.list_kind(), GroupVersionKind::gvk("", "v1", "ReplicationControllerList"));
    }

    #[test]
    fn test_defaults() {
        let kinds = WorkloadKind::defaults()
            .iter()
            .map(|kind| kind.api_resource().api_version)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec!["apps/v1", "apps/v1", "apps/v1", "apps/v1", "batch/v1"]);
    }
}
