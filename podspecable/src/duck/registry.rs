use std::collections::BTreeMap;

use crate::{
    duck::{Implementable, PopulatableObject, decode_value},
    error::Error,
};

type NewFullType = fn() -> Box<dyn PopulatableObject>;
type DecodeFullType = fn(serde_json::Value) -> Result<Box<dyn PopulatableObject>, Error>;

struct Registration {
    new: NewFullType,
    decode: DecodeFullType,
}

/// Maps a shape name to the full type that materializes it.
///
/// The table is filled once, at start-up, and only read afterwards.
#[derive(Default)]
pub struct ShapeRegistry {
    shapes: BTreeMap<&'static str, Registration>,
}

impl ShapeRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers the full type of shape `I` under `I::SHAPE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateShape`] if a shape with the same name is
    /// already registered.
    pub fn register<I>(&mut self) -> Result<(), Error>
    where
        I: Implementable + Default,
    {
        if self.shapes.contains_key(I::SHAPE) {
            return Err(Error::DuplicateShape { shape: I::SHAPE });
        }
        let registration = Registration { new: new_full::<I>, decode: decode_full::<I> };
        drop(self.shapes.insert(I::SHAPE, registration));
        tracing::debug!("Registered shape {}", I::SHAPE);
        Ok(())
    }

    /// Registers shape `I`, replacing any earlier registration under the same
    /// name.
    #[must_use]
    pub fn with_shape<I>(mut self) -> Self
    where
        I: Implementable + Default,
    {
        let registration = Registration { new: new_full::<I>, decode: decode_full::<I> };
        drop(self.shapes.insert(I::SHAPE, registration));
        self
    }

    #[must_use]
    pub fn contains(&self, shape: &str) -> bool { self.shapes.contains_key(shape) }

    /// Names of every registered shape, in lexical order.
    pub fn shapes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.shapes.keys().copied()
    }

    /// Builds a fresh, zero-valued full type for `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownShape`] if nothing is registered under `shape`.
    pub fn full_type(&self, shape: &str) -> Result<Box<dyn PopulatableObject>, Error> {
        self.lookup(shape).map(|registration| (registration.new)())
    }

    /// Decodes a document of any kind into the full type of `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownShape`] if nothing is registered under `shape`,
    /// or a decode error if the document does not match the full type.
    pub fn decode(
        &self,
        shape: &str,
        document: serde_json::Value,
    ) -> Result<Box<dyn PopulatableObject>, Error> {
        self.lookup(shape).and_then(|registration| (registration.decode)(document))
    }

    fn lookup(&self, shape: &str) -> Result<&Registration, Error> {
        self.shapes.get(shape).ok_or_else(|| Error::UnknownShape { shape: shape.to_string() })
    }
}

fn new_full<I>() -> Box<dyn PopulatableObject>
where
    I: Implementable + Default,
{
    Box::new(I::default().full_type())
}

fn decode_full<I>(document: serde_json::Value) -> Result<Box<dyn PopulatableObject>, Error>
where
    I: Implementable,
{
    let full: I::Full = decode_value(document)?;
    Ok(Box::new(full))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        duck::{Populatable, Typed},
        podspec::{PodSpecable, WithPod},
    };

    #[test]
    fn test_with_shape() {
        let shapes = ShapeRegistry::new().with_shape::<PodSpecable>().with_shape::<PodSpecable>();

        assert!(shapes.contains("PodSpecable"));
        assert!(!shapes.contains("Addressable"));
        assert_eq!(shapes.shapes().collect::<Vec<_>>(), vec!["PodSpecable"]);
    }

    #[test]
    fn test_full_type() {
        let shapes = ShapeRegistry::new().with_shape::<PodSpecable>();

        let mut full = shapes.full_type("PodSpecable").expect("PodSpecable is registered");
        assert_eq!(full.downcast_ref::<WithPod>(), Some(&WithPod::default()));
        Populatable::populate(&mut *full);
        assert_ne!(full.downcast_ref::<WithPod>(), Some(&WithPod::default()));

        let err = shapes.full_type("podspecable").unwrap_err();
        assert!(matches!(err, Error::UnknownShape { shape } if shape == "podspecable"));
    }

    #[test]
    fn test_decode() {
        let shapes = ShapeRegistry::new().with_shape::<PodSpecable>();
        let document = json!({ "apiVersion": "batch/v1", "kind": "Job" });

        let full = shapes.decode("PodSpecable", document.clone()).expect("Should decode a job");
        assert_eq!(Typed::group_version_kind(&*full).kind, "Job");

        let err = shapes.decode("Addressable", document).unwrap_err();
        assert!(matches!(err, Error::UnknownShape { shape } if shape == "Addressable"));

        let err = shapes.decode("PodSpecable", json!({ "spec": [] })).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_empty_registry() {
        let shapes = ShapeRegistry::new();
        assert_eq!(shapes.shapes().count(), 0);
        assert!(matches!(shapes.full_type("PodSpecable"), Err(Error::UnknownShape { .. })));
    }
}
