//! Capabilities shared by duck types.
//!
//! A duck type is a Rust type that describes only the part of a resource that
//! many unrelated kinds agree on. Any document whose fields match that part
//! can be decoded into it, regardless of the kind it was produced by. The
//! traits in this module describe what generic code may do with such types:
//! report their identity, build owner references to them, list them,
//! materialize them from a shape name and populate them with example values.

mod metadata;
mod registry;
mod scheme;
mod type_meta;
mod verify;

use std::{any::Any, fmt};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::core::GroupVersionKind;
use serde::{Serialize, de::DeserializeOwned};
use snafu::ResultExt;

pub use self::{
    metadata::Metadata,
    registry::ShapeRegistry,
    scheme::Scheme,
    type_meta::{TypeMeta, api_version, display_gvk},
    verify::{lost_fields, verify_type},
};
use crate::error::{self, Error};

/// Reports the group, version and kind a value was filed under.
pub trait Typed {
    fn group_version_kind(&self) -> GroupVersionKind;
}

/// A resource that other resources may point at through an owner reference.
pub trait OwnerRefable: Typed {
    fn object_meta(&self) -> &ObjectMeta;

    /// Builds a reference marking `self` as the managing controller of
    /// another object, taking the kind from the resource's own type fields.
    ///
    /// Returns `None` if the kind, version, name or uid is not known yet.
    fn typed_controller_ref(&self) -> Option<OwnerReference> {
        let GroupVersionKind { group, version, kind } = self.group_version_kind();
        if kind.is_empty() || version.is_empty() {
            return None;
        }
        let meta = self.object_meta();
        Some(OwnerReference {
            api_version: api_version(&group, &version),
            kind,
            name: meta.name.clone()?,
            uid: meta.uid.clone()?,
            controller: Some(true),
            block_owner_deletion: Some(true),
        })
    }
}

/// Fills a value with a fixed, non-empty example.
///
/// Calling `populate` more than once resets the value to the same example.
pub trait Populatable {
    fn populate(&mut self);
}

/// A type that generic "list this kind" operations can build an empty,
/// correctly typed list for.
pub trait Listable: Typed {
    type List: Default;

    fn list_type(&self) -> Self::List { Self::List::default() }
}

/// A nested shape that other resources can declare they contain.
pub trait Implementable {
    /// Name under which the shape is looked up.
    const SHAPE: &'static str;

    /// The full resource type used whenever "some resource implementing this
    /// shape" has to be materialized.
    type Full: PopulatableObject + Serialize + DeserializeOwned + Default;

    fn full_type(&self) -> Self::Full { Self::Full::default() }
}

/// Type-erased view of a decoded resource.
pub trait Object: Typed + Any + fmt::Debug + Send + Sync {
    /// Encodes the resource back into its document form.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be represented as JSON.
    fn to_value(&self) -> Result<serde_json::Value, Error>;

    fn as_any(&self) -> &dyn Any;
}

impl<T> Object for T
where
    T: Typed + Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn to_value(&self) -> Result<serde_json::Value, Error> {
        serde_json::to_value(self)
            .context(error::EncodeJsonSnafu { type_name: std::any::type_name::<T>() })
    }

    fn as_any(&self) -> &dyn Any { self }
}

impl dyn Object {
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> { self.as_any().downcast_ref::<T>() }
}

/// A type-erased full type that can also be populated.
pub trait PopulatableObject: Object + Populatable {}

impl<T> PopulatableObject for T where T: Object + Populatable {}

impl dyn PopulatableObject {
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> { self.as_any().downcast_ref::<T>() }
}

/// Decodes a JSON value into `T`, naming `T` in the error.
pub(crate) fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(value)
        .context(error::DecodeJsonSnafu { type_name: std::any::type_name::<T>() })
}
