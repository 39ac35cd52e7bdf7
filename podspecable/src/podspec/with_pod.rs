use std::{borrow::Cow, sync::LazyLock};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::{ApiResource, DynamicResourceScope, GroupVersionKind, Resource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    duck::{Listable, Metadata, OwnerRefable, Populatable, TypeMeta, Typed},
    podspec::{PodSpecable, WithPodList},
};

static EMPTY_TEMPLATE: LazyLock<PodSpecable> = LazyLock::new(PodSpecable::default);

/// Any resource that carries a pod template under `spec.template`.
///
/// Decoding never looks at the kind of the resource: a `Deployment`, a
/// `StatefulSet` or a custom resource all decode as long as their fields
/// have the expected structure. Fields outside that structure are kept in
/// `extra` (top level) and [`WithPodSpec::extra`] (next to the template).
/// Encoding writes back exactly the fields that were received.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WithPod {
    #[serde(flatten)]
    pub types: TypeMeta,

    #[serde(default, skip_serializing_if = "Metadata::is_absent")]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<WithPodSpec>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WithPodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodSpecable>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WithPod {
    /// The pod template, or an empty one if the resource has none.
    #[must_use]
    pub fn template(&self) -> &PodSpecable {
        self.spec.as_ref().and_then(|spec| spec.template.as_ref()).unwrap_or(&EMPTY_TEMPLATE)
    }

    /// The pod template, created empty if the resource has none.
    pub fn template_mut(&mut self) -> &mut PodSpecable {
        self.spec
            .get_or_insert_with(WithPodSpec::default)
            .template
            .get_or_insert_with(PodSpecable::default)
    }
}

impl Typed for WithPod {
    fn group_version_kind(&self) -> GroupVersionKind { self.types.group_version_kind() }
}

impl OwnerRefable for WithPod {
    fn object_meta(&self) -> &ObjectMeta { &self.metadata }
}

impl Populatable for WithPod {
    fn populate(&mut self) { *self.template_mut() = PodSpecable::fixture(); }
}

impl Listable for WithPod {
    type List = WithPodList;
}

/// Lets `kube::Api<WithPod>` talk to any workload kind; the kind is picked
/// at runtime through the [`ApiResource`].
impl Resource for WithPod {
    type DynamicType = ApiResource;
    type Scope = DynamicResourceScope;

    fn kind(dt: &ApiResource) -> Cow<'_, str> { dt.kind.as_str().into() }

    fn group(dt: &ApiResource) -> Cow<'_, str> { dt.group.as_str().into() }

    fn version(dt: &ApiResource) -> Cow<'_, str> { dt.version.as_str().into() }

    fn api_version(dt: &ApiResource) -> Cow<'_, str> { dt.api_version.as_str().into() }

    fn plural(dt: &ApiResource) -> Cow<'_, str> { dt.plural.as_str().into() }

    fn meta(&self) -> &ObjectMeta { &self.metadata }

    fn meta_mut(&mut self) -> &mut ObjectMeta { &mut self.metadata }
}
