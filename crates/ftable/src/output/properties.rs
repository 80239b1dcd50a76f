//! Property declaration output formatting.

use ftable_core::filter::Operator;
use ftable_core::{FilteringProperty, PropertyType};
use serde::Serialize;

use super::helpers::{dimmed, pad};

/// JSON output structure for one property.
#[derive(Serialize)]
pub struct PropertyOutput<'a> {
    pub key: &'a str,
    pub label: &'a str,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub operators: &'a [Operator],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_values_label: Option<&'a str>,
}

/// JSON output structure for the properties command.
#[derive(Serialize)]
pub struct PropertiesListOutput<'a> {
    pub properties: Vec<PropertyOutput<'a>>,
}

/// Formats property declarations as JSON.
pub fn format_properties_json(properties: &[FilteringProperty]) -> Result<String, serde_json::Error> {
    let output = PropertiesListOutput {
        properties: properties
            .iter()
            .map(|p| PropertyOutput {
                key: &p.key,
                label: p.label(),
                property_type: p.property_type,
                operators: p.operators(),
                group_values_label: p.group_values_label.as_deref(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats property declarations as a table.
pub fn format_properties_table(properties: &[FilteringProperty], use_colors: bool) -> String {
    if properties.is_empty() {
        return "No filterable properties.\n".to_string();
    }

    let key_width = properties
        .iter()
        .map(|p| p.key.chars().count())
        .fold("Key".len(), usize::max);
    let label_width = properties
        .iter()
        .map(|p| p.label().chars().count())
        .fold("Label".len(), usize::max);

    let mut output = String::new();

    let header = format!(
        "{} {} {:<8} {}",
        pad("Key", key_width),
        pad("Label", label_width),
        "Type",
        "Operators"
    );
    output.push_str(&dimmed(&header, use_colors));
    output.push('\n');

    for p in properties {
        let operators: Vec<&str> = p.operators().iter().map(Operator::symbol).collect();
        let line = format!(
            "{} {} {:<8} {}",
            pad(&p.key, key_width),
            pad(p.label(), label_width),
            p.property_type.as_str(),
            operators.join(" ")
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}
