use std::ops::{Deref, DerefMut};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, de::DeserializeOwned, ser};
use serde_json::{Map, Value};

/// A typed metadata view that remembers the object it was decoded from.
///
/// The typed view (`ObjectMeta` or `ListMeta`) only knows the keys the
/// platform defines and reads `null` as absent. Encoding starts from the
/// received object and writes back every key the view does not account for,
/// so unknown keys and `null` values survive a round trip. Keys changed
/// through the view are written with their new value, keys cleared through
/// the view are dropped.
///
/// A value that was never received and never set is absent: fields holding
/// it can be skipped on encode with [`Metadata::is_absent`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata<M = ObjectMeta> {
    meta: M,

    // The view as decoded, to tell edited keys from untouched ones.
    decoded: M,

    raw: Option<Map<String, Value>>,
}

impl<M> Metadata<M>
where
    M: Default + PartialEq,
{
    /// `true` when nothing was received and nothing has been set since.
    #[must_use]
    pub fn is_absent(&self) -> bool { self.raw.is_none() && self.meta == M::default() }

    /// The value of `key` exactly as it was received, known to the typed view
    /// or not.
    #[must_use]
    pub fn raw_field(&self, key: &str) -> Option<&Value> {
        self.raw.as_ref().and_then(|raw| raw.get(key))
    }

    pub fn into_inner(self) -> M { self.meta }
}

impl<M> From<M> for Metadata<M>
where
    M: Default,
{
    fn from(meta: M) -> Self { Self { meta, decoded: M::default(), raw: None } }
}

impl<M> Deref for Metadata<M> {
    type Target = M;

    fn deref(&self) -> &M { &self.meta }
}

impl<M> DerefMut for Metadata<M> {
    fn deref_mut(&mut self) -> &mut M { &mut self.meta }
}

impl<M> Serialize for Metadata<M>
where
    M: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let current = to_map(&self.meta).map_err(ser::Error::custom)?;
        let Some(raw) = &self.raw else {
            return current.serialize(serializer);
        };
        let decoded = to_map(&self.decoded).map_err(ser::Error::custom)?;

        let mut merged = raw
            .iter()
            .filter_map(|(key, received)| match (current.get(key), decoded.get(key)) {
                (Some(now), Some(then)) if now == then => Some((key.clone(), received.clone())),
                (Some(now), _) => Some((key.clone(), now.clone())),
                (None, Some(_)) => None,
                (None, None) => Some((key.clone(), received.clone())),
            })
            .collect::<Map<_, _>>();
        merged.extend(current.into_iter().filter(|(key, _)| !raw.contains_key(key)));
        merged.serialize(serializer)
    }
}

impl<'de, M> Deserialize<'de> for Metadata<M>
where
    M: DeserializeOwned + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let meta: M =
            serde_json::from_value(Value::Object(raw.clone())).map_err(de::Error::custom)?;
        Ok(Self { decoded: meta.clone(), meta, raw: Some(raw) })
    }
}

fn to_map<M>(meta: &M) -> Result<Map<String, Value>, serde_json::Error>
where
    M: Serialize,
{
    serde_json::to_value(meta).and_then(serde_json::from_value)
}
