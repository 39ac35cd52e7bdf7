use std::collections::HashMap;

use kube::core::GroupVersionKind;
use serde::{Deserialize, de::DeserializeOwned};
use snafu::ResultExt;

use crate::{
    duck::{Object, TypeMeta, decode_value, display_gvk},
    error::{self, Error},
};

type NewObject = fn() -> Box<dyn Object>;
type DecodeObject = fn(serde_json::Value) -> Result<Box<dyn Object>, Error>;

struct KnownType {
    type_name: &'static str,
    new: NewObject,
    decode: DecodeObject,
}

/// Files Rust types under named, versioned kinds.
///
/// Several kinds may share one Rust type; this is how every workload kind
/// carrying a pod template resolves to the same envelope.
#[derive(Default)]
pub struct Scheme {
    known_types: HashMap<GroupVersionKind, KnownType>,
}

impl Scheme {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers `T` as the Rust type for `gvk`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKind`] if `gvk` is already registered.
    pub fn add_known_type<T>(&mut self, gvk: GroupVersionKind) -> Result<(), Error>
    where
        T: Object + DeserializeOwned + Default,
    {
        if self.known_types.contains_key(&gvk) {
            return Err(Error::DuplicateKind { kind: display_gvk(&gvk) });
        }
        let type_name = std::any::type_name::<T>();
        tracing::debug!("Registered {} as {type_name}", display_gvk(&gvk));
        let known_type = KnownType { type_name, new: new_object::<T>, decode: decode_object::<T> };
        drop(self.known_types.insert(gvk, known_type));
        Ok(())
    }

    #[must_use]
    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool { self.known_types.contains_key(gvk) }

    /// Name of the Rust type registered for `gvk`.
    #[must_use]
    pub fn type_name(&self, gvk: &GroupVersionKind) -> Option<&'static str> {
        self.known_types.get(gvk).map(|known_type| known_type.type_name)
    }

    /// Every registered kind, in no particular order.
    pub fn known_kinds(&self) -> impl Iterator<Item = &GroupVersionKind> {
        self.known_types.keys()
    }

    /// Builds a fresh, zero-valued object of the type registered for `gvk`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKind`] if `gvk` is not registered.
    pub fn new_object(&self, gvk: &GroupVersionKind) -> Result<Box<dyn Object>, Error> {
        self.lookup(gvk).map(|known_type| (known_type.new)())
    }

    /// Decodes a document into the type registered for the kind named by its
    /// own `apiVersion` and `kind` fields.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the document is malformed, or
    /// [`Error::UnknownKind`] if its kind is not registered.
    pub fn decode(&self, document: serde_json::Value) -> Result<Box<dyn Object>, Error> {
        let types = TypeMeta::deserialize(&document)
            .context(error::DecodeJsonSnafu { type_name: std::any::type_name::<TypeMeta>() })?;
        let gvk = types.group_version_kind();
        self.lookup(&gvk).and_then(|known_type| (known_type.decode)(document))
    }

    fn lookup(&self, gvk: &GroupVersionKind) -> Result<&KnownType, Error> {
        self.known_types.get(gvk).ok_or_else(|| Error::UnknownKind { kind: display_gvk(gvk) })
    }
}

fn new_object<T>() -> Box<dyn Object>
where
    T: Object + Default,
{
    Box::new(T::default())
}

fn decode_object<T>(document: serde_json::Value) -> Result<Box<dyn Object>, Error>
where
    T: Object + DeserializeOwned,
{
    let object: T = decode_value(document)?;
    Ok(Box::new(object))
}
