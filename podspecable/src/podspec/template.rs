use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use podspecable_base::consts::fixture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    duck::{Implementable, Metadata},
    podspec::WithPod,
};

/// The pod template embedded, under `spec.template`, in every workload kind
/// in the manner of `ReplicaSet`, `Deployment`, `DaemonSet` and `StatefulSet`.
///
/// Only the fields needed to observe the pods are typed. Every other field is
/// kept in `extra` and written back on encode; fields that were not received
/// are not written.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PodSpecable {
    #[serde(default, skip_serializing_if = "Metadata::is_absent")]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PodSpec>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The runtime part of a pod template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single container of a pod template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Container {
    pub name: String,

    pub image: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self { name: name.into(), image: image.into(), extra: Map::new() }
    }
}

impl PodSpecable {
    /// The example template used to exercise generic round trips: one label
    /// and one container.
    #[must_use]
    pub fn fixture() -> Self {
        let labels =
            BTreeMap::from([(fixture::LABEL_KEY.to_string(), fixture::LABEL_VALUE.to_string())]);
        Self {
            metadata: Metadata::from(ObjectMeta { labels: Some(labels), ..ObjectMeta::default() }),
            spec: Some(PodSpec {
                containers: Some(vec![Container::new(
                    fixture::CONTAINER_NAME,
                    fixture::CONTAINER_IMAGE,
                )]),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Labels of the pods created from this template.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.labels.iter().flatten().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Containers in template order; empty when the template has none.
    #[must_use]
    pub fn containers(&self) -> &[Container] {
        self.spec.as_ref().and_then(|spec| spec.containers.as_deref()).unwrap_or_default()
    }

    /// Images referenced by the containers, in container order.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.containers().iter().map(|container| container.image.as_str())
    }

    #[must_use]
    pub fn find_container(&self, name: &str) -> Option<&Container> {
        self.containers().iter().find(|container| container.name == name)
    }
}

impl Implementable for PodSpecable {
    type Full = WithPod;

    const SHAPE: &'static str = "PodSpecable";
}
