//! Record model.
//!
//! A [`Record`] is an open mapping from property key to a scalar [`Value`],
//! plus a string identity stored under the `id` key. No schema is enforced;
//! callers describe filterable properties separately with
//! [`FilteringProperty`](crate::FilteringProperty).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DataError, DataResult};

/// Property key holding the record identity.
pub const ID_KEY: &str = "id";

/// Largest integral magnitude that round-trips exactly through `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A scalar property value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A number. Integers are stored as `f64`.
    Number(f64),
    /// Free text, including ISO-8601 dates.
    String(String),
}

impl Value {
    /// Coerces the value to a number.
    ///
    /// Strings are trimmed before parsing and an empty string coerces to
    /// zero. Booleans coerce to `1` and `0`. Returns `None` when the result
    /// would not be a number.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::String(s) => return coerce_number(s),
        };
        (!n.is_nan()).then_some(n)
    }

    /// Returns the value's truthiness.
    ///
    /// Booleans are taken as-is, numbers are truthy when non-zero, strings
    /// when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Coerces free text to a number, mirroring loose numeric conversion:
/// surrounding whitespace is ignored and blank text is zero. Spellings of
/// infinity such as `inf` are not numbers.
pub(crate) fn coerce_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// A single row of data.
///
/// Serialized as a flat JSON object. The `id` key is required and must be a
/// string; `null` values are treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Option<Value>>",
    into = "BTreeMap<String, Value>"
)]
pub struct Record {
    /// Always contains [`ID_KEY`] mapped to a [`Value::String`].
    properties: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a record with the given identity and no other properties.
    pub fn new(id: impl Into<String>) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(ID_KEY.to_string(), Value::String(id.into()));
        Self { properties }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a property. Setting `id` replaces the identity with the value's
    /// string form.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let value = if key == ID_KEY {
            Value::String(value.to_string())
        } else {
            value
        };
        self.properties.insert(key, value);
    }

    /// Removes a property and returns it. The identity cannot be removed.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if key == ID_KEY {
            return None;
        }
        self.properties.remove(key)
    }

    /// Returns the record identity.
    pub fn id(&self) -> &str {
        self.properties
            .get(ID_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Iterates over all properties (including `id`) in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl TryFrom<BTreeMap<String, Option<Value>>> for Record {
    type Error = DataError;

    fn try_from(raw: BTreeMap<String, Option<Value>>) -> Result<Self, Self::Error> {
        let properties: BTreeMap<String, Value> = raw
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        match properties.get(ID_KEY) {
            None => Err(DataError::MissingId),
            Some(Value::String(_)) => Ok(Self { properties }),
            Some(other) => Err(DataError::InvalidId {
                found: other.to_string(),
            }),
        }
    }
}

impl From<Record> for BTreeMap<String, Value> {
    fn from(record: Record) -> Self {
        record.properties
    }
}

/// Loads a JSON array of records from disk.
///
/// # Errors
///
/// - Returns `DataError::ReadError` if the file cannot be read.
/// - Returns `DataError::Json` if the file is not an array of records.
pub fn load_records(path: &Path) -> DataResult<Vec<Record>> {
    let contents = fs::read_to_string(path).map_err(|e| DataError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| DataError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}
