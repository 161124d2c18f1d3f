//! Immutable named-field container produced by the factories.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::ops::Index;

use crate::error::EnumError;
use crate::value::Value;

/// Immutable, ordered mapping from field names to values.
///
/// Fields are reachable by name ([`get`](Self::get), [`field`](Self::field))
/// and by position ([`get_index`](Self::get_index)). The reverse direction,
/// value to field name, is [`field_for_value`](Self::field_for_value).
///
/// Two containers are equal when they hold the same fields, in the same
/// order, with equal values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EnumContainer {
    fields: IndexMap<String, Value>,
}

impl EnumContainer {
    /// Field names must already be unique; the factories guarantee it.
    pub(crate) fn new(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field value by name, failing with [`EnumError::UndefinedField`]
    pub fn field(&self, name: &str) -> Result<&Value, EnumError> {
        self.fields
            .get(name)
            .ok_or_else(|| EnumError::UndefinedField(name.to_string()))
    }

    /// Get a field by position
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.fields
            .get_index(index)
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in field order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field values in field order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Find the name of the first field whose value equals `value`.
    ///
    /// # Errors
    /// Returns [`EnumError::ValueNotFound`] if no field holds the value.
    ///
    /// # Example
    /// ```
    /// use enumerator::{build_sequence, Value};
    ///
    /// let colors = build_sequence(["red", "green"]).unwrap();
    /// assert_eq!(colors.field_for_value(&Value::Int(1)).unwrap(), "GREEN");
    /// assert!(colors.field_for_value(&Value::Int(9)).is_err());
    /// ```
    pub fn field_for_value(&self, value: &Value) -> Result<&str, EnumError> {
        self.fields
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| EnumError::ValueNotFound(value.clone()))
    }

    /// Copy the fields into a plain ordered map
    pub fn to_map(&self) -> IndexMap<String, Value> {
        self.fields.clone()
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.fields
    }

    /// Convert container to JSON string
    pub fn to_json(&self) -> Result<String, EnumError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert container to pretty-printed JSON string
    pub fn to_json_pretty(&self) -> Result<String, EnumError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PartialEq for EnumContainer {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

/// Panics if the field is not defined, like indexing a map.
impl Index<&str> for EnumContainer {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        &self.fields[name]
    }
}

impl<'a> IntoIterator for &'a EnumContainer {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for EnumContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enum(")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Value::Str(s) => write!(f, "{}={:?}", name, s)?,
                other => write!(f, "{}={}", name, other)?,
            }
        }
        write!(f, ")")
    }
}
