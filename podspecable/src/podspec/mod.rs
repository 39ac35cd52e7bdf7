//! The pod template duck type.
//!
//! [`PodSpecable`] is the template every workload kind carries under
//! `spec.template`; [`WithPod`] is the envelope around it and
//! [`WithPodList`] the list returned when listing such resources.

mod list;
mod template;
mod with_pod;

use std::sync::LazyLock;

use kube::core::GroupVersionKind;
use podspecable_base::consts::k8s;

pub use self::{
    list::WithPodList,
    template::{Container, PodSpec, PodSpecable},
    with_pod::{WithPod, WithPodSpec},
};
use crate::{
    duck::{Scheme, ShapeRegistry},
    error::Error,
};

/// Shapes known to this crate, filled on first use.
pub static SHAPES: LazyLock<ShapeRegistry> =
    LazyLock::new(|| ShapeRegistry::new().with_shape::<PodSpecable>());

/// Group, version and kind of the envelope itself.
#[must_use]
pub fn with_pod_kind() -> GroupVersionKind {
    GroupVersionKind::gvk(k8s::duck::GROUP, k8s::duck::VERSION, k8s::duck::WITH_POD_KIND)
}

/// Group, version and kind of the envelope list.
#[must_use]
pub fn with_pod_list_kind() -> GroupVersionKind {
    GroupVersionKind::gvk(k8s::duck::GROUP, k8s::duck::VERSION, k8s::duck::WITH_POD_LIST_KIND)
}

/// Files [`WithPod`] and [`WithPodList`] under the duck group.
///
/// # Errors
///
/// Returns [`Error::DuplicateKind`] if either kind is already registered.
pub fn add_to_scheme(scheme: &mut Scheme) -> Result<(), Error> {
    scheme.add_known_type::<WithPod>(with_pod_kind())?;
    scheme.add_known_type::<WithPodList>(with_pod_list_kind())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::duck::{Implementable, Object, Populatable, Typed};

    #[test]
    fn test_shapes_know_pod_specable() {
        assert!(SHAPES.contains(PodSpecable::SHAPE));
        assert_eq!(SHAPES.shapes().collect::<Vec<_>>(), vec!["PodSpecable"]);
    }

    #[test]
    fn test_shapes_materialize_full_type() {
        let mut full = SHAPES.full_type("PodSpecable").expect("PodSpecable is registered");
        assert_eq!(full.downcast_ref::<WithPod>(), Some(&WithPod::default()));

        Populatable::populate(&mut *full);
        let with_pod = full.downcast_ref::<WithPod>().expect("Full type of PodSpecable");
        assert_eq!(with_pod.template(), &PodSpecable::fixture());
    }

    #[test]
    fn test_shapes_decode_any_workload() {
        let full = SHAPES
            .decode(
                "PodSpecable",
                json!({
                    "apiVersion": "apps/v1",
                    "kind": "StatefulSet",
                    "spec": {
                        "serviceName": "db",
                        "template": {
                            "spec": { "containers": [{ "name": "db", "image": "pg:17" }] },
                        },
                    },
                }),
            )
            .expect("Should decode a stateful set");
        let gvk = GroupVersionKind::gvk("apps", "v1", "StatefulSet");
        assert_eq!(Typed::group_version_kind(&*full), gvk);
    }

    #[test]
    fn test_shapes_reject_unknown_and_duplicate_shapes() {
        assert!(matches!(SHAPES.full_type("Addressable"), Err(Error::UnknownShape { .. })));

        let mut shapes = ShapeRegistry::new();
        shapes.register::<PodSpecable>().expect("First registration succeeds");
        assert!(matches!(
            shapes.register::<PodSpecable>(),
            Err(Error::DuplicateShape { shape: "PodSpecable" })
        ));
    }

    #[test]
    fn test_add_to_scheme() {
        let mut scheme = Scheme::new();
        add_to_scheme(&mut scheme).expect("Should register the duck kinds");

        assert!(scheme.recognizes(&with_pod_kind()));
        assert!(scheme.recognizes(&with_pod_list_kind()));
        assert!(matches!(add_to_scheme(&mut scheme), Err(Error::DuplicateKind { .. })));

        let list = scheme.new_object(&with_pod_list_kind()).expect("List kind is registered");
        assert_eq!(list.downcast_ref::<WithPodList>(), Some(&WithPodList::default()));
    }

    #[test]
    fn test_scheme_decodes_by_document_kind() {
        let mut scheme = Scheme::new();
        add_to_scheme(&mut scheme).expect("Should register the duck kinds");

        let object = scheme
            .decode(json!({
                "apiVersion": "duck.podspecable.dev/v1alpha1",
                "kind": "WithPod",
                "metadata": { "name": "example" },
            }))
            .expect("Should decode a registered kind");
        let with_pod = object.downcast_ref::<WithPod>().expect("WithPod is registered");
        assert_eq!(with_pod.metadata.name.as_deref(), Some("example"));
        let encoded = Object::to_value(&*object).expect("Should encode");
        assert_eq!(encoded["kind"], json!("WithPod"));

        let err = scheme.decode(json!({ "apiVersion": "v1", "kind": "ConfigMap" })).unwrap_err();
        assert!(matches!(err, Error::UnknownKind { kind } if kind == "v1, Kind=ConfigMap"));

        let err = scheme.decode(json!("not an object")).unwrap_err();
        assert!(err.is_decode_error());
    }
}
