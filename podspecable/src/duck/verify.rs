use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use snafu::ResultExt;

use crate::{
    duck::{Implementable, Object, Populatable, decode_value},
    error::{self, Error},
};

/// Checks that the concrete type `K` carries every field of the shape `I`.
///
/// The full type of the shape is populated with its example value and sent
/// through `K` and back. Every field of the example that does not come back
/// unchanged is reported; fields that `K` adds on its own are fine.
///
/// # Errors
///
/// Returns [`Error::ShapeNotImplemented`] listing the lost fields, or a
/// decode/encode error if the example cannot be converted at all.
pub fn verify_type<K, I>(shape: &I) -> Result<(), Error>
where
    K: Serialize + DeserializeOwned,
    I: Implementable,
{
    let type_name = std::any::type_name::<K>();

    let mut input = shape.full_type();
    Populatable::populate(&mut input);
    let before = Object::to_value(&input)?;

    let instance: K = decode_value(before.clone())?;
    let roundtripped =
        serde_json::to_value(&instance).context(error::EncodeJsonSnafu { type_name })?;

    let output: I::Full = decode_value(roundtripped)?;
    let after = Object::to_value(&output)?;

    let lost_fields = lost_fields(&before, &after);
    if lost_fields.is_empty() {
        tracing::debug!("{type_name} implements the duck type {}", I::SHAPE);
        Ok(())
    } else {
        Err(Error::ShapeNotImplemented { type_name, shape: I::SHAPE, lost_fields })
    }
}

/// Lists the paths of every field in `before` that is missing from, or
/// different in, `after`.
///
/// Objects are compared key by key and arrays element by element; keys that
/// only `after` has are ignored. Paths use `.` between keys and `[n]` for
/// array elements, e.g. `spec.template.spec.containers[0].image`.
#[must_use]
pub fn lost_fields(before: &Value, after: &Value) -> Vec<String> {
    let mut lost = Vec::new();
    collect_lost_fields("", before, after, &mut lost);
    lost
}

fn collect_lost_fields(path: &str, before: &Value, after: &Value, lost: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before), Value::Object(after)) => {
            for (key, value) in before {
                let path = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                match after.get(key) {
                    Some(after) => collect_lost_fields(&path, value, after, lost),
                    None => lost.push(path),
                }
            }
        }
        (Value::Array(before), Value::Array(after)) => {
            for (index, value) in before.iter().enumerate() {
                let path = format!("{path}[{index}]");
                match after.get(index) {
                    Some(after) => collect_lost_fields(&path, value, after, lost),
                    None => lost.push(path),
                }
            }
        }
        (before, after) if before == after => {}
        _ => lost.push(if path.is_empty() { ".".to_string() } else { path.to_string() }),
    }
}
