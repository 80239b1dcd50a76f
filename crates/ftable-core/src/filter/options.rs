//! Dependent filter options.
//!
//! Candidate values for each filterable property are collected from the
//! records that already pass the current filter, so choosing one filter
//! narrows the choices offered for every other property.

use std::collections::HashSet;

use serde::Serialize;

use crate::property::FilteringProperty;
use crate::record::Record;

/// One candidate value for a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteringOption {
    /// Property the value belongs to.
    pub property_key: String,
    /// Stringified value.
    pub value: String,
}

/// Collects the distinct values of each declared property among `records`.
///
/// Properties are visited in declaration order and values in first-seen
/// order. Records without a value for a property contribute nothing to it.
pub fn derive_options(
    records: &[&Record],
    properties: &[FilteringProperty],
) -> Vec<FilteringOption> {
    let mut options = Vec::new();

    for property in properties {
        let mut seen: HashSet<String> = HashSet::new();
        for record in records {
            let Some(value) = record.get(&property.key) else {
                continue;
            };
            let value = value.to_string();
            if seen.insert(value.clone()) {
                options.push(FilteringOption {
                    property_key: property.key.clone(),
                    value,
                });
            }
        }
    }

    options
}

/// Returns the option values belonging to `property_key`.
pub fn values_for<'a>(
    options: &'a [FilteringOption],
    property_key: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    options
        .iter()
        .filter(move |o| o.property_key == property_key)
        .map(|o| o.value.as_str())
}
