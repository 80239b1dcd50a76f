//! Filter option output formatting.

use ftable_core::filter::{values_for, FilteringOption};
use ftable_core::FilteringProperty;
use serde::Serialize;

use super::helpers::{bold, dimmed, pad};

/// JSON output structure for one property's candidate values.
#[derive(Serialize)]
pub struct PropertyOptionsOutput<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub values: Vec<&'a str>,
}

/// JSON output structure for the options command.
#[derive(Serialize)]
pub struct OptionsOutput<'a> {
    pub total: usize,
    pub options: Vec<PropertyOptionsOutput<'a>>,
}

fn group<'a>(
    options: &'a [FilteringOption],
    properties: &'a [FilteringProperty],
) -> Vec<PropertyOptionsOutput<'a>> {
    properties
        .iter()
        .map(|p| PropertyOptionsOutput {
            key: &p.key,
            label: p.group_values_label.as_deref().unwrap_or(p.label()),
            values: values_for(options, &p.key).collect(),
        })
        .collect()
}

/// Formats options as JSON, grouped by property.
///
/// `total` is the number of filtered records the options were drawn from.
pub fn format_options_json(
    options: &[FilteringOption],
    properties: &[FilteringProperty],
    total: usize,
) -> Result<String, serde_json::Error> {
    let output = OptionsOutput {
        total,
        options: group(options, properties),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats options as a two-column table: property label and its values.
pub fn format_options_table(
    options: &[FilteringOption],
    properties: &[FilteringProperty],
    use_colors: bool,
) -> String {
    let groups = group(options, properties);
    if groups.is_empty() {
        return "No filterable properties.\n".to_string();
    }

    let width = groups
        .iter()
        .map(|g| g.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for g in &groups {
        let label = pad(g.label, width);
        let values = if g.values.is_empty() {
            dimmed("(none)", use_colors)
        } else {
            g.values.join(", ")
        };
        output.push_str(&format!("{}  {}\n", bold(&label, use_colors), values));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftable_core::filter::derive_options;
    use ftable_core::{PropertyType, Record};

    fn fixture() -> (Vec<Record>, Vec<FilteringProperty>) {
        let records = vec![
            Record::new("A").with("state", "Activated").with("deliveryMethod", "Web"),
            Record::new("B").with("state", "Pending").with("deliveryMethod", "RTMP"),
            Record::new("C").with("state", "Activated").with("deliveryMethod", "Web"),
        ];
        let properties = vec![
            FilteringProperty::new("state", "State", PropertyType::String)
                .with_group_values_label("State values"),
            FilteringProperty::new("deliveryMethod", "Delivery method", PropertyType::String),
            FilteringProperty::new("origin", "Origin", PropertyType::String),
        ];
        (records, properties)
    }

    #[test]
    fn test_format_options_table() {
        let (records, properties) = fixture();
        let refs: Vec<&Record> = records.iter().collect();
        let options = derive_options(&refs, &properties);

        let output = format_options_table(&options, &properties, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "State values     Activated, Pending");
        assert_eq!(lines[1], "Delivery method  Web, RTMP");
        assert_eq!(lines[2], "Origin           (none)");
    }

    #[test]
    fn test_format_options_json() {
        let (records, properties) = fixture();
        let refs: Vec<&Record> = records.iter().take(1).collect();
        let options = derive_options(&refs, &properties);

        let json: serde_json::Value =
            serde_json::from_str(&format_options_json(&options, &properties, 1).unwrap()).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["options"][0]["key"], "state");
        assert_eq!(json["options"][0]["values"], serde_json::json!(["Activated"]));
        assert_eq!(json["options"][1]["label"], "Delivery method");
        assert_eq!(json["options"][2]["values"], serde_json::json!([]));
    }

    #[test]
    fn test_format_options_no_properties() {
        assert_eq!(
            format_options_table(&[], &[], false),
            "No filterable properties.\n"
        );
    }
}
