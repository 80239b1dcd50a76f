//! Filterable property declarations.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::filter::Operator;
use crate::record::{Record, Value, ID_KEY};

/// Comparison semantics applied to a property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Case-insensitive text comparison.
    #[default]
    String,
    /// Numeric comparison after coercion.
    Number,
    /// Boolean comparison ("true"/"enabled" are true).
    Boolean,
    /// Lexicographic comparison of ISO-8601 date strings.
    Date,
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::Contains,
    Operator::NotContains,
    Operator::StartsWith,
    Operator::NotStartsWith,
];

const ORDERED_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::Greater,
    Operator::GreaterOrEqual,
    Operator::Less,
    Operator::LessOrEqual,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Equals, Operator::NotEquals];

impl PropertyType {
    /// Returns every operator the type can evaluate.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            PropertyType::String => STRING_OPERATORS,
            PropertyType::Number | PropertyType::Date => ORDERED_OPERATORS,
            PropertyType::Boolean => BOOLEAN_OPERATORS,
        }
    }

    /// Returns true if the type can evaluate `operator`.
    pub fn supports(self, operator: &Operator) -> bool {
        self.operators().contains(operator)
    }

    /// Type used when a property has no declaration: numbers and booleans
    /// keep their kind, everything else compares as text.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Number(_) => PropertyType::Number,
            Value::Bool(_) => PropertyType::Boolean,
            Value::String(_) => PropertyType::String,
        }
    }

    /// Lowercase name as used in property files.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Date => "date",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property the table can be filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteringProperty {
    /// Record key the property reads.
    pub key: String,

    /// Human-readable label. Falls back to the key when empty.
    #[serde(default)]
    pub property_label: String,

    /// Label for the group of candidate values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_values_label: Option<String>,

    /// Comparison semantics.
    #[serde(rename = "type", default)]
    pub property_type: PropertyType,

    /// Operators offered for this property. `None` offers every operator the
    /// type supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<Operator>>,
}

impl FilteringProperty {
    /// Creates a declaration offering every operator of `property_type`.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        property_type: PropertyType,
    ) -> Self {
        Self {
            key: key.into(),
            property_label: label.into(),
            group_values_label: None,
            property_type,
            operators: None,
        }
    }

    /// Restricts the offered operators.
    pub fn with_operators(mut self, operators: Vec<Operator>) -> Self {
        self.operators = Some(operators);
        self
    }

    /// Sets the group values label.
    pub fn with_group_values_label(mut self, label: impl Into<String>) -> Self {
        self.group_values_label = Some(label.into());
        self
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        if self.property_label.is_empty() {
            &self.key
        } else {
            &self.property_label
        }
    }

    /// Returns the operators offered for this property.
    pub fn operators(&self) -> &[Operator] {
        match &self.operators {
            Some(ops) => ops,
            None => self.property_type.operators(),
        }
    }
}

/// Derives property declarations from the records themselves.
///
/// Keys appear with `id` first, then in first-seen order. Numbers become
/// [`PropertyType::Number`], booleans [`PropertyType::Boolean`], strings that
/// all parse as `YYYY-MM-DD` become [`PropertyType::Date`]. A key holding
/// values of different kinds falls back to [`PropertyType::String`].
pub fn infer_properties(records: &[Record]) -> Vec<FilteringProperty> {
    let mut order: Vec<String> = vec![ID_KEY.to_string()];
    let mut types: HashMap<String, PropertyType> = HashMap::new();
    types.insert(ID_KEY.to_string(), PropertyType::String);

    for record in records {
        for (key, value) in record.properties() {
            let seen = infer_value_type(value);
            match types.get_mut(key) {
                Some(existing) if *existing != seen => *existing = PropertyType::String,
                Some(_) => {}
                None => {
                    order.push(key.to_string());
                    types.insert(key.to_string(), seen);
                }
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let property_type = types.get(&key).copied().unwrap_or_default();
            FilteringProperty::new(key, String::new(), property_type)
        })
        .collect()
}

fn infer_value_type(value: &Value) -> PropertyType {
    match value {
        Value::String(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => {
            PropertyType::Date
        }
        other => PropertyType::of_value(other),
    }
}

/// Loads a JSON array of property declarations from disk.
///
/// # Errors
///
/// - Returns `DataError::ReadError` if the file cannot be read.
/// - Returns `DataError::Json` if the file is not an array of declarations.
pub fn load_properties(path: &Path) -> DataResult<Vec<FilteringProperty>> {
    let contents = fs::read_to_string(path).map_err(|e| DataError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| DataError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}
