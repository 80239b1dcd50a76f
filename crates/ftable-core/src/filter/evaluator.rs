//! Query evaluation against records.
//!
//! This module provides the [`FilterEvaluator`] for evaluating a [`Query`]
//! against [`Record`]s, and the [`FilterContext`] holding the per-property
//! type declarations that drive comparison semantics.
//!
//! # Comparison rules
//!
//! - A record without a value for the token's key never matches.
//! - `number`: both sides are coerced to numbers; if either is not a number
//!   the token does not match.
//! - `boolean`: `"true"` and `"enabled"` (any case) are true, anything else is
//!   false; the stored value is compared by truthiness.
//! - `date`: ISO-8601 strings are compared lexicographically.
//! - `string`: case-insensitive equality, substring and prefix tests.
//!
//! An operator the property's type cannot evaluate never matches.
//!
//! # Example
//!
//! ```
//! use ftable_core::filter::{FilterContext, FilterEvaluator, Operator, Query, Token};
//! use ftable_core::{FilteringProperty, PropertyType, Record};
//!
//! let properties = vec![FilteringProperty::new("logging", "Logging", PropertyType::Boolean)];
//! let context = FilterContext::new(&properties);
//!
//! let record = Record::new("A").with("logging", true);
//! let token = Token::new("logging", Operator::Equals, "Enabled");
//! assert!(context.matches(&record, &token));
//!
//! let query = Query::and(vec![token]);
//! let evaluator = FilterEvaluator::new(&query, &context);
//! assert!(evaluator.matches(&record));
//! ```

use std::borrow::Cow;

use tracing::debug;

use super::ast::{Operation, Operator, Query, Token};
use crate::property::{FilteringProperty, PropertyType};
use crate::record::{coerce_number, Record, Value};

/// Property compared by the exact-date pre-filter unless configured otherwise.
pub const DEFAULT_DATE_PROPERTY: &str = "lastModified";

/// Context for filter evaluation.
///
/// Holds the property declarations used to choose comparison semantics and
/// the key compared by the exact-date pre-filter.
#[derive(Debug, Clone)]
pub struct FilterContext<'a> {
    properties: &'a [FilteringProperty],
    date_property: &'a str,
}

impl<'a> FilterContext<'a> {
    /// Creates a context over the given declarations.
    pub fn new(properties: &'a [FilteringProperty]) -> Self {
        Self {
            properties,
            date_property: DEFAULT_DATE_PROPERTY,
        }
    }

    /// Sets the key compared by the exact-date pre-filter.
    pub fn with_date_property(mut self, key: &'a str) -> Self {
        self.date_property = key;
        self
    }

    /// Returns the key compared by the exact-date pre-filter.
    pub fn date_property(&self) -> &str {
        self.date_property
    }

    /// Finds the declaration for `key`.
    pub fn property(&self, key: &str) -> Option<&FilteringProperty> {
        self.properties.iter().find(|p| p.key == key)
    }

    /// Resolves the comparison type for `key`.
    ///
    /// Declared properties use their declared type. Undeclared properties use
    /// the stored value's kind; dates are never inferred here.
    pub fn property_type(&self, key: &str, value: &Value) -> PropertyType {
        self.property(key)
            .map(|p| p.property_type)
            .unwrap_or_else(|| PropertyType::of_value(value))
    }

    /// Returns true if `record` satisfies `token`.
    pub fn matches(&self, record: &Record, token: &Token) -> bool {
        let Some(stored) = record.get(&token.property_key) else {
            return false;
        };

        let input = token.value.as_str();
        match self.property_type(&token.property_key, stored) {
            PropertyType::Number => compare_numbers(stored, &token.operator, input),
            PropertyType::Boolean => compare_booleans(stored, &token.operator, input),
            PropertyType::Date => compare_dates(stored, &token.operator, input),
            PropertyType::String => compare_strings(stored, &token.operator, input),
        }
    }

    /// Returns true if the record's date property equals `date` exactly.
    pub fn matches_exact_date(&self, record: &Record, date: &str) -> bool {
        record
            .get(self.date_property)
            .and_then(Value::as_str)
            .is_some_and(|stored| stored == date)
    }
}

/// Evaluates a query against records.
///
/// The evaluator takes a reference to a [`Query`] and a [`FilterContext`],
/// plus an optional exact-date value. The exact-date check is always
/// combined with the token result by AND, whatever the query's operation.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    query: &'a Query,
    context: &'a FilterContext<'a>,
    exact_date: Option<&'a str>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    ///
    /// # Arguments
    ///
    /// * `query` - The query to evaluate
    /// * `context` - Property declarations used for type dispatch
    pub fn new(query: &'a Query, context: &'a FilterContext<'a>) -> Self {
        Self {
            query,
            context,
            exact_date: None,
        }
    }

    /// Restricts matches to records whose date property equals `date`.
    ///
    /// `None` or an empty string disables the pre-filter.
    pub fn with_exact_date(mut self, date: Option<&'a str>) -> Self {
        self.exact_date = date.filter(|d| !d.is_empty());
        self
    }

    /// Returns true if the record matches the exact-date pre-filter and the
    /// query.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(date) = self.exact_date {
            if !self.context.matches_exact_date(record, date) {
                return false;
            }
        }

        let tokens = &self.query.tokens;
        if tokens.is_empty() {
            return true;
        }

        match self.query.operation {
            Operation::And => tokens.iter().all(|t| self.context.matches(record, t)),
            Operation::Or => tokens.iter().any(|t| self.context.matches(record, t)),
        }
    }

    /// Filters a slice of records, returning the matches in input order.
    pub fn filter_records<'b>(&self, records: &'b [Record]) -> Vec<&'b Record> {
        let matched: Vec<&Record> = records.iter().filter(|r| self.matches(r)).collect();
        debug!(
            total = records.len(),
            matched = matched.len(),
            tokens = self.query.tokens.len(),
            operation = %self.query.operation,
            "evaluated query"
        );
        matched
    }
}

fn compare_numbers(stored: &Value, operator: &Operator, input: &str) -> bool {
    let (Some(left), Some(right)) = (stored.as_number(), coerce_number(input)) else {
        return false;
    };

    match operator {
        Operator::Equals => left == right,
        Operator::NotEquals => left != right,
        Operator::Greater => left > right,
        Operator::GreaterOrEqual => left >= right,
        Operator::Less => left < right,
        Operator::LessOrEqual => left <= right,
        _ => false,
    }
}

fn compare_booleans(stored: &Value, operator: &Operator, input: &str) -> bool {
    let wanted = input.eq_ignore_ascii_case("true") || input.eq_ignore_ascii_case("enabled");
    let actual = stored.is_truthy();

    match operator {
        Operator::Equals => actual == wanted,
        Operator::NotEquals => actual != wanted,
        _ => false,
    }
}

fn compare_dates(stored: &Value, operator: &Operator, input: &str) -> bool {
    let stored = display_text(stored);
    let left = stored.as_ref();

    match operator {
        Operator::Equals => left == input,
        Operator::NotEquals => left != input,
        Operator::Greater => left > input,
        Operator::GreaterOrEqual => left >= input,
        Operator::Less => left < input,
        Operator::LessOrEqual => left <= input,
        _ => false,
    }
}

fn compare_strings(stored: &Value, operator: &Operator, input: &str) -> bool {
    let left = display_text(stored).to_lowercase();
    let right = input.to_lowercase();

    match operator {
        Operator::Equals => left == right,
        Operator::NotEquals => left != right,
        Operator::Contains => left.contains(&right),
        Operator::NotContains => !left.contains(&right),
        Operator::StartsWith => left.starts_with(&right),
        Operator::NotStartsWith => !left.starts_with(&right),
        _ => false,
    }
}

fn display_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
