//! Lenient deserializers for fields the server does not always send in the same shape.

use super::NameValue;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render any JSON value as text; strings are taken verbatim.
pub(super) fn json_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

/// Accept headers/params either as a list of `{name, value}` rows or as a
/// `{name: value}` object.
pub(super) fn name_values<'de, D>(deserializer: D) -> Result<Vec<NameValue>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        List(Vec<NameValue>),
        Object(serde_json::Map<String, Value>),
        Null(()),
    }

    Ok(match Shape::deserialize(deserializer)? {
        Shape::List(rows) => rows,
        Shape::Object(map) => map
            .into_iter()
            .map(|(name, value)| NameValue {
                name,
                value: value_to_text(value),
            })
            .collect(),
        Shape::Null(()) => Vec::new(),
    })
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
