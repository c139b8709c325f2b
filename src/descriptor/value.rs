use serde_json::{Map, Value};

use crate::foundation::error::{SceneError, SceneResult};

/// Typed, non-failing access to string-keyed descriptor fields.
///
/// Every accessor returns `None` on a missing key or a type mismatch.
pub trait Fields {
    /// Raw field value.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Numeric field (integers are widened).
    fn number(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::as_f64)
    }

    /// Numeric field with a fallback.
    fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// String field.
    fn string(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// Boolean field.
    fn boolean(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Value::as_bool)
    }

    /// Boolean field that only counts when explicitly `true`.
    fn flag(&self, key: &str) -> bool {
        self.boolean(key).unwrap_or(false)
    }

    /// List field.
    fn list(&self, key: &str) -> Option<&[Value]> {
        self.field(key).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Nested record field.
    fn record(&self, key: &str) -> Option<&Map<String, Value>> {
        self.field(key).and_then(Value::as_object)
    }

    /// List of numbers; `None` if any entry is not numeric.
    fn numbers(&self, key: &str) -> Option<Vec<f64>> {
        self.list(key)?.iter().map(Value::as_f64).collect()
    }

    /// A string or a list of strings (non-string entries skipped).
    fn strings(&self, key: &str) -> Option<Vec<String>> {
        match self.field(key)? {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl Fields for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Declarative definition of one element: a string-keyed record plus nested `elements`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Descriptor(Map<String, Value>);

impl Fields for Descriptor {
    fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for Descriptor {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Descriptor {
    /// Empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; `None` unless it is a record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Parse a descriptor from JSON text.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let value: Value = serde_json::from_str(s).map_err(|e| SceneError::serde(e.to_string()))?;
        Self::from_value(value)
            .ok_or_else(|| SceneError::validation("element descriptor must be a JSON object"))
    }

    /// Underlying record.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying record.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Return `true` if `key` is present with any value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Nested child descriptors from `elements`, in order; non-record entries are skipped.
    pub fn children(&self) -> Vec<Descriptor> {
        self.list("elements")
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_object().cloned().map(Descriptor))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/descriptor/value.rs"]
mod tests;
