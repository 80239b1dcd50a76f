//! Lookups shared by commands: saved filters by ID prefix and property key
//! suggestions.

use ftable_core::filter::Query;
use ftable_core::{FilterStorage, FilteringProperty, SavedFilter, SavedFilterStore, ID_KEY};
use strsim::levenshtein;

use super::{CommandError, Result};

/// Maximum Levenshtein distance to consider a key as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Finds a saved filter by full ID or unique prefix.
pub fn find_saved_by_id_or_prefix<'a, S: FilterStorage>(
    store: &'a SavedFilterStore<S>,
    id: &str,
) -> Result<&'a SavedFilter> {
    if let Some(filter) = store.get(id) {
        return Ok(filter);
    }

    let matches: Vec<&SavedFilter> = store
        .filters()
        .iter()
        .filter(|f| f.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => Err(CommandError::Config(format!("Saved filter not found: {id}"))),
        1 => Ok(matches[0]),
        _ => {
            let mut msg = format!(
                "Ambiguous saved filter ID \"{id}\"\n\nMultiple saved filters match this prefix:"
            );
            for filter in matches.iter().take(5) {
                msg.push_str(&format!("\n  {}  {}", filter.id, filter.name));
            }
            if matches.len() > 5 {
                msg.push_str(&format!("\n  ... and {} more", matches.len() - 5));
            }
            msg.push_str("\n\nPlease use a longer prefix.");
            Err(CommandError::Config(msg))
        }
    }
}

/// Finds the closest property key to `key`.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
fn find_similar_key<'a>(key: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let key_lower = key.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|candidate| !candidate.is_empty() && *candidate != key)
        .map(|candidate| (candidate, levenshtein(&key_lower, &candidate.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    (best_distance <= MAX_SUGGESTION_DISTANCE).then_some(best_match)
}

/// Finds a declared property by key.
///
/// The error suggests the closest declared key when one is within the
/// suggestion threshold.
pub fn find_property<'a>(
    properties: &'a [FilteringProperty],
    key: &str,
) -> Result<&'a FilteringProperty> {
    if let Some(property) = properties.iter().find(|p| p.key == key) {
        return Ok(property);
    }

    let mut msg = format!("Unknown property '{key}'.");
    if let Some(suggestion) = find_similar_key(key, properties.iter().map(|p| p.key.as_str())) {
        msg.push_str(&format!(" Did you mean '{suggestion}'?"));
    }
    Err(CommandError::Config(msg))
}

/// Returns a warning for every token whose property key is not declared.
///
/// Such tokens are still evaluated against the stored value's own type, so a
/// record holding the key can match. The record id is always filterable and
/// never warned about.
pub fn unknown_property_warnings(query: &Query, properties: &[FilteringProperty]) -> Vec<String> {
    let mut warnings = Vec::new();

    for token in &query.tokens {
        let key = token.property_key.as_str();
        if key == ID_KEY || properties.iter().any(|p| p.key == key) {
            continue;
        }

        let base = format!("'{key}' is not a declared property; comparing by value type.");
        let message = match find_similar_key(key, properties.iter().map(|p| p.key.as_str())) {
            Some(suggestion) => format!("{base} Did you mean '{suggestion}'?"),
            None => base,
        };
        if !warnings.contains(&message) {
            warnings.push(message);
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftable_core::filter::{Operator, Token};
    use ftable_core::{MemoryStorage, PropertyType};

    fn store() -> SavedFilterStore<MemoryStorage> {
        SavedFilterStore::load(MemoryStorage::new())
    }

    fn properties() -> Vec<FilteringProperty> {
        vec![
            FilteringProperty::new("state", "State", PropertyType::String),
            FilteringProperty::new("deliveryMethod", "Delivery method", PropertyType::String),
            FilteringProperty::new("requests", "Requests", PropertyType::Number),
        ]
    }

    #[test]
    fn test_find_saved_exact_match() {
        let store = store();
        let filter = find_saved_by_id_or_prefix(&store, "default-high-traffic").unwrap();
        assert_eq!(filter.name, "High traffic");
    }

    #[test]
    fn test_find_saved_unique_prefix() {
        let store = store();
        let filter = find_saved_by_id_or_prefix(&store, "default-l").unwrap();
        assert_eq!(filter.id, "default-logging-disabled");
    }

    #[test]
    fn test_find_saved_not_found() {
        let store = store();
        let err = find_saved_by_id_or_prefix(&store, "nonexistent").unwrap_err();
        assert!(err.to_string().contains("Saved filter not found"));
    }

    #[test]
    fn test_find_saved_ambiguous() {
        let store = store();
        let err = find_saved_by_id_or_prefix(&store, "default-").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Ambiguous"), "{msg}");
        assert!(msg.contains("default-active-web"), "{msg}");
    }

    #[test]
    fn test_find_property() {
        let properties = properties();
        assert_eq!(find_property(&properties, "requests").unwrap().label(), "Requests");

        let err = find_property(&properties, "request").unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: Unknown property 'request'. Did you mean 'requests'?"
        );

        let err = find_property(&properties, "region").unwrap_err();
        assert!(!err.to_string().contains("Did you mean"));
    }

    #[test]
    fn test_unknown_property_suggestion() {
        let query = Query::and(vec![
            Token::new("stat", Operator::Equals, "Pending"),
            Token::new("requests", Operator::Greater, "10"),
        ]);
        let warnings = unknown_property_warnings(&query, &properties());
        assert_eq!(
            warnings,
            vec!["'stat' is not a declared property; comparing by value type. Did you mean 'state'?"]
        );
    }

    #[test]
    fn test_unknown_property_case_mismatch() {
        let query = Query::and(vec![Token::new("DeliveryMethod", Operator::Equals, "Web")]);
        let warnings = unknown_property_warnings(&query, &properties());
        assert!(warnings[0].contains("Did you mean 'deliveryMethod'?"));
    }

    #[test]
    fn test_unknown_property_without_suggestion() {
        let query = Query::and(vec![Token::new("region", Operator::Equals, "eu")]);
        let warnings = unknown_property_warnings(&query, &properties());
        assert_eq!(
            warnings,
            vec!["'region' is not a declared property; comparing by value type."]
        );
    }

    #[test]
    fn test_undeclared_key_still_matches() {
        use ftable_core::filter::{FilterContext, FilterEvaluator};
        use ftable_core::Record;

        let properties = vec![FilteringProperty::new("state", "State", PropertyType::String)];
        let records = vec![
            Record::new("A").with("domainName", "www.example.com"),
            Record::new("B").with("domainName", "cdn.other.net"),
        ];
        let query = Query::and(vec![
            Token::new("domainName", Operator::Contains, "example"),
            Token::new("id", Operator::Equals, "A"),
        ]);

        let warnings = unknown_property_warnings(&query, &properties);
        assert_eq!(
            warnings,
            vec!["'domainName' is not a declared property; comparing by value type."]
        );

        let context = FilterContext::new(&properties);
        let matched = FilterEvaluator::new(&query, &context).filter_records(&records);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id(), "A");
    }

    #[test]
    fn test_known_properties_no_warnings() {
        let query = Query::and(vec![Token::new("state", Operator::Equals, "Pending")]);
        assert!(unknown_property_warnings(&query, &properties()).is_empty());
    }
}
