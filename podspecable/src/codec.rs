//! Conversions between duck types and their wire formats.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use snafu::ResultExt;

use crate::{
    error::{self, Error},
    podspec::{PodSpecable, WithPod, WithPodList},
};

/// A value that can be read from and written to a Kubernetes document.
///
/// Decoding only checks that the fields the type knows about have the
/// expected structure; the kind of the document is never consulted.
pub trait Document: Serialize + DeserializeOwned {
    /// # Errors
    ///
    /// Returns [`Error::DecodeJson`] if the bytes are not a well-formed
    /// document of the expected structure.
    fn from_json_slice(bytes: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(bytes)
            .context(error::DecodeJsonSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// # Errors
    ///
    /// Returns [`Error::DecodeJson`] if the text is not a well-formed
    /// document of the expected structure.
    fn from_json_str(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text)
            .context(error::DecodeJsonSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// # Errors
    ///
    /// Returns [`Error::DecodeJson`] if the value does not have the expected
    /// structure.
    fn from_json_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value)
            .context(error::DecodeJsonSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// # Errors
    ///
    /// Returns [`Error::DecodeYaml`] if the text is not a well-formed
    /// document of the expected structure.
    fn from_yaml_str(text: &str) -> Result<Self, Error> {
        serde_yaml::from_str(text)
            .context(error::DecodeYamlSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// Views a typed resource, e.g. a `Deployment`, through this type.
    ///
    /// # Errors
    ///
    /// Returns an encode error if `object` cannot be written out, or a
    /// decode error if its fields do not match this type.
    fn from_object<K>(object: &K) -> Result<Self, Error>
    where
        K: Serialize,
    {
        let value = serde_json::to_value(object)
            .context(error::EncodeJsonSnafu { type_name: std::any::type_name::<K>() })?;
        Self::from_json_value(value)
    }

    /// # Errors
    ///
    /// Returns [`Error::EncodeJson`] if the value cannot be encoded.
    fn to_json_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self)
            .context(error::EncodeJsonSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// # Errors
    ///
    /// Returns [`Error::EncodeJson`] if the value cannot be encoded.
    fn to_json_string(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .context(error::EncodeJsonSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// # Errors
    ///
    /// Returns [`Error::EncodeYaml`] if the value cannot be encoded.
    fn to_yaml_string(&self) -> Result<String, Error> {
        serde_yaml::to_string(self)
            .context(error::EncodeYamlSnafu { type_name: std::any::type_name::<Self>() })
    }

    /// Writes this value back into a typed resource.
    ///
    /// # Errors
    ///
    /// Returns an encode error if `self` cannot be written out, or a decode
    /// error if the result does not fit `K`.
    fn into_object<K>(self) -> Result<K, Error>
    where
        K: DeserializeOwned,
    {
        let value = self.to_json_value()?;
        serde_json::from_value(value)
            .context(error::DecodeJsonSnafu { type_name: std::any::type_name::<K>() })
    }
}

impl Document for WithPod {}

impl Document for WithPodList {}

impl Document for PodSpecable {}
