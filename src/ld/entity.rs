//! Linked-data entity records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A node of the source linked-data graph.
///
/// Deserialises from a flattened JSON-LD node object: `@id`, `@type` (string
/// or array) and every remaining key as a raw property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "@id")]
    pub id: String,
    /// Most specific type first
    #[serde(
        rename = "@type",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub types: Vec<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<String>, types: &[&str]) -> Self {
        Self {
            id: id.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            properties: Map::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Builder-style reference setter: stores `{"@id": target}` (or an array of them).
    pub fn with_refs(self, key: impl Into<String>, targets: &[&str]) -> Self {
        let refs: Vec<Value> = targets
            .iter()
            .map(|t| serde_json::json!({ "@id": t }))
            .collect();
        let value = match refs.len() {
            1 => refs.into_iter().next().unwrap_or(Value::Null),
            _ => Value::Array(refs),
        };
        self.with_property(key, value)
    }

    /// Raw property value stored under exactly `key`.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(t) => vec![t],
        OneOrMany::Many(ts) => ts,
    })
}
