use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::core::{GroupVersionKind, ObjectList};
use serde::{Deserialize, Serialize};

use crate::{
    duck::{Metadata, TypeMeta, Typed},
    podspec::WithPod,
};

/// A list of [`WithPod`] resources, as returned when listing any workload
/// kind.
///
/// Items keep the order they were received in.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WithPodList {
    #[serde(flatten)]
    pub types: TypeMeta,

    #[serde(default, skip_serializing_if = "Metadata::is_absent")]
    pub metadata: Metadata<ListMeta>,

    #[serde(default)]
    pub items: Vec<WithPod>,
}

impl WithPodList {
    /// Token to pass as `continue` to fetch the next page, if any.
    #[must_use]
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata.continue_.as_deref().filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn resource_version(&self) -> Option<&str> { self.metadata.resource_version.as_deref() }

    /// Appends the items of the next page and takes over its list metadata.
    pub fn append_page(&mut self, page: Self) {
        self.metadata = page.metadata;
        self.items.extend(page.items);
    }
}

impl Typed for WithPodList {
    fn group_version_kind(&self) -> GroupVersionKind { self.types.group_version_kind() }
}

impl From<ObjectList<WithPod>> for WithPodList {
    fn from(list: ObjectList<WithPod>) -> Self {
        Self {
            types: TypeMeta::default(),
            metadata: Metadata::from(list.metadata),
            items: list.items,
        }
    }
}

impl IntoIterator for WithPodList {
    type IntoIter = std::vec::IntoIter<WithPod>;
    type Item = WithPod;

    fn into_iter(self) -> Self::IntoIter { self.items.into_iter() }
}
