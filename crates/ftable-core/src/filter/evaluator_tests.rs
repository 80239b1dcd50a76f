//! Tests for filter evaluation.

use super::*;
use crate::filter::ast::Operation;

// ==================== Test Helpers ====================

fn declared() -> Vec<FilteringProperty> {
    vec![
        FilteringProperty::new("id", "Distribution ID", PropertyType::String),
        FilteringProperty::new("state", "State", PropertyType::String),
        FilteringProperty::new("deliveryMethod", "Delivery method", PropertyType::String),
        FilteringProperty::new("requests", "Requests", PropertyType::Number),
        FilteringProperty::new("logging", "Logging", PropertyType::Boolean),
        FilteringProperty::new("lastModified", "Last Modified", PropertyType::Date),
    ]
}

fn make_record(id: &str, state: &str, method: &str, requests: i64, logging: bool, date: &str) -> Record {
    Record::new(id)
        .with("state", state)
        .with("deliveryMethod", method)
        .with("requests", requests)
        .with("logging", logging)
        .with("lastModified", date)
}

fn token(key: &str, operator: Operator, value: &str) -> Token {
    Token::new(key, operator, value)
}

fn check(record: &Record, token: &Token) -> bool {
    let props = declared();
    let context = FilterContext::new(&props);
    context.matches(record, token)
}

fn sample() -> Vec<Record> {
    vec![
        make_record("WEB001", "Activated", "Web", 9000, true, "2024-01-05"),
        make_record("WEB002", "Pending", "Web", 1200, false, "2024-01-20"),
        make_record("RTMP001", "Deactivated", "RTMP", 5000, false, "2024-02-03"),
        make_record("RTMP002", "Pending", "RTMP", 3000, true, "2024-01-20"),
    ]
}

fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

// ==================== Missing Values ====================

#[test]
fn test_missing_property_never_matches() {
    let record = Record::new("A");
    assert!(!check(&record, &token("state", Operator::Equals, "")));
    assert!(!check(&record, &token("state", Operator::NotEquals, "x")));
    assert!(!check(&record, &token("requests", Operator::NotEquals, "1")));
}

#[test]
fn test_id_is_filterable() {
    let record = Record::new("ABCDEF");
    assert!(check(&record, &token("id", Operator::Contains, "bcd")));
    assert!(check(&record, &token("id", Operator::StartsWith, "abc")));
    assert!(!check(&record, &token("id", Operator::NotContains, "BCD")));
}

// ==================== Numeric ====================

#[test]
fn test_numeric_greater_or_equal() {
    let record = Record::new("A").with("requests", 5000);
    assert!(check(&record, &token("requests", Operator::GreaterOrEqual, "5000")));
    assert!(!check(&record, &token("requests", Operator::GreaterOrEqual, "5001")));
}

#[test]
fn test_numeric_all_operators() {
    let record = Record::new("A").with("requests", 10);
    assert!(check(&record, &token("requests", Operator::Equals, "10")));
    assert!(check(&record, &token("requests", Operator::Equals, "10.0")));
    assert!(check(&record, &token("requests", Operator::NotEquals, "11")));
    assert!(check(&record, &token("requests", Operator::Greater, "9")));
    assert!(!check(&record, &token("requests", Operator::Greater, "10")));
    assert!(check(&record, &token("requests", Operator::Less, "11")));
    assert!(check(&record, &token("requests", Operator::LessOrEqual, "10")));
    assert!(!check(&record, &token("requests", Operator::LessOrEqual, "9")));
}

#[test]
fn test_numeric_non_number_input_never_matches() {
    let record = Record::new("A").with("requests", 10);
    assert!(!check(&record, &token("requests", Operator::Equals, "ten")));
    assert!(!check(&record, &token("requests", Operator::NotEquals, "ten")));
}

#[test]
fn test_numeric_infinity_input_never_matches() {
    let record = Record::new("A").with("requests", 10);
    assert!(!check(&record, &token("requests", Operator::Less, "inf")));
    assert!(!check(&record, &token("requests", Operator::Greater, "-infinity")));
}

#[test]
fn test_numeric_declared_property_coerces_stored_string() {
    let record = Record::new("A").with("requests", " 250 ");
    assert!(check(&record, &token("requests", Operator::Greater, "100")));

    let record = Record::new("A").with("requests", "lots");
    assert!(!check(&record, &token("requests", Operator::Greater, "100")));
    assert!(!check(&record, &token("requests", Operator::NotEquals, "100")));
}

#[test]
fn test_numeric_blank_input_is_zero() {
    let record = Record::new("A").with("requests", 0);
    assert!(check(&record, &token("requests", Operator::Equals, "")));
}

#[test]
fn test_numeric_string_operator_never_matches() {
    let record = Record::new("A").with("requests", 5000);
    assert!(!check(&record, &token("requests", Operator::Contains, "50")));
    assert!(!check(&record, &token("requests", Operator::StartsWith, "5")));
}

#[test]
fn test_undeclared_number_uses_numeric_semantics() {
    let context = FilterContext::new(&[]);
    let record = Record::new("A").with("score", 7.5);
    assert!(context.matches(&record, &token("score", Operator::Greater, "7")));
    assert!(!context.matches(&record, &token("score", Operator::Contains, "7")));
}

// ==================== Boolean ====================

#[test]
fn test_boolean_enabled_keyword() {
    let record = Record::new("A").with("logging", true);
    assert!(check(&record, &token("logging", Operator::Equals, "Enabled")));
    assert!(!check(&record, &token("logging", Operator::Equals, "disabled")));
}

#[test]
fn test_boolean_true_keyword_case_insensitive() {
    let record = Record::new("A").with("logging", false);
    assert!(check(&record, &token("logging", Operator::Equals, "FALSE")));
    assert!(!check(&record, &token("logging", Operator::Equals, "TRUE")));
    assert!(check(&record, &token("logging", Operator::NotEquals, "true")));
}

#[test]
fn test_boolean_unrecognized_input_is_false() {
    let record = Record::new("A").with("logging", false);
    assert!(check(&record, &token("logging", Operator::Equals, "yes")));
}

#[test]
fn test_boolean_unsupported_operator() {
    let record = Record::new("A").with("logging", true);
    assert!(!check(&record, &token("logging", Operator::Greater, "false")));
    assert!(!check(&record, &token("logging", Operator::Contains, "true")));
}

#[test]
fn test_undeclared_bool_uses_boolean_semantics() {
    let context = FilterContext::new(&[]);
    let record = Record::new("A").with("cached", true);
    assert!(context.matches(&record, &token("cached", Operator::Equals, "enabled")));
}

// ==================== Date ====================

#[test]
fn test_date_less_than() {
    let record = Record::new("A").with("lastModified", "2024-01-10");
    assert!(check(&record, &token("lastModified", Operator::Less, "2024-02-01")));
    assert!(!check(&record, &token("lastModified", Operator::Greater, "2024-02-01")));
}

#[test]
fn test_date_bounds_inclusive() {
    let record = Record::new("A").with("lastModified", "2024-01-10");
    assert!(check(&record, &token("lastModified", Operator::GreaterOrEqual, "2024-01-10")));
    assert!(check(&record, &token("lastModified", Operator::LessOrEqual, "2024-01-10")));
    assert!(check(&record, &token("lastModified", Operator::Equals, "2024-01-10")));
    assert!(check(&record, &token("lastModified", Operator::NotEquals, "2024-01-11")));
}

#[test]
fn test_date_contains_never_matches() {
    let record = Record::new("A").with("lastModified", "2024-01-10");
    assert!(!check(&record, &token("lastModified", Operator::Contains, "2024")));
}

#[test]
fn test_date_string_without_declaration_is_text() {
    let context = FilterContext::new(&[]);
    let record = Record::new("A").with("lastModified", "2024-01-10");
    assert!(context.matches(&record, &token("lastModified", Operator::Contains, "01-10")));
    assert!(!context.matches(&record, &token("lastModified", Operator::Less, "2024-02-01")));
}

// ==================== String ====================

#[test]
fn test_string_contains_case_insensitive() {
    let record = Record::new("A").with("state", "Activated");
    assert!(check(&record, &token("state", Operator::Contains, "TIVA")));
    assert!(check(&record, &token("state", Operator::Equals, "activated")));
    assert!(check(&record, &token("state", Operator::NotContains, "pending")));
}

#[test]
fn test_string_starts_with() {
    let record = Record::new("A").with("state", "Deactivated");
    assert!(check(&record, &token("state", Operator::StartsWith, "de")));
    assert!(!check(&record, &token("state", Operator::NotStartsWith, "DE")));
    assert!(check(&record, &token("state", Operator::NotStartsWith, "act")));
}

#[test]
fn test_string_ordered_operator_never_matches() {
    let record = Record::new("A").with("state", "b");
    assert!(!check(&record, &token("state", Operator::Greater, "a")));
    assert!(!check(&record, &token("state", Operator::LessOrEqual, "c")));
}

#[test]
fn test_string_declared_property_stringifies_numbers() {
    let props = vec![FilteringProperty::new("port", "Port", PropertyType::String)];
    let context = FilterContext::new(&props);
    let record = Record::new("A").with("port", 8080);
    assert!(context.matches(&record, &token("port", Operator::StartsWith, "80")));
}

#[test]
fn test_unknown_operator_never_matches_any_type() {
    let unknown = Operator::Unknown("~".to_string());
    let record = make_record("A", "Activated", "Web", 10, true, "2024-01-01");

    for key in ["state", "requests", "logging", "lastModified", "id"] {
        assert!(
            !check(&record, &token(key, unknown.clone(), "x")),
            "unknown operator matched on {key}"
        );
    }
}

// ==================== Query Evaluation ====================

#[test]
fn test_empty_query_keeps_everything() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::new();

    let result = FilterEvaluator::new(&query, &context).filter_records(&records);
    assert_eq!(result.len(), records.len());
}

#[test]
fn test_and_requires_every_token() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::and(vec![
        token("state", Operator::Equals, "Pending"),
        token("deliveryMethod", Operator::Equals, "RTMP"),
    ]);

    let result = FilterEvaluator::new(&query, &context).filter_records(&records);
    assert_eq!(ids(&result), vec!["RTMP002"]);
}

#[test]
fn test_or_requires_any_token() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::or(vec![
        token("requests", Operator::Greater, "8000"),
        token("state", Operator::Equals, "Deactivated"),
    ]);

    let result = FilterEvaluator::new(&query, &context).filter_records(&records);
    assert_eq!(ids(&result), vec!["WEB001", "RTMP001"]);
}

#[test]
fn test_or_with_unknown_operator_token() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::or(vec![
        token("state", Operator::Unknown("??".into()), "Pending"),
        token("deliveryMethod", Operator::Equals, "RTMP"),
    ]);

    let result = FilterEvaluator::new(&query, &context).filter_records(&records);
    assert_eq!(ids(&result), vec!["RTMP001", "RTMP002"]);
}

#[test]
fn test_results_preserve_input_order() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::and(vec![token("requests", Operator::Greater, "0")]);

    let result = FilterEvaluator::new(&query, &context).filter_records(&records);
    assert_eq!(ids(&result), vec!["WEB001", "WEB002", "RTMP001", "RTMP002"]);
}

#[test]
fn test_exact_date_prefilter_alone() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::new();

    let result = FilterEvaluator::new(&query, &context)
        .with_exact_date(Some("2024-01-20"))
        .filter_records(&records);
    assert_eq!(ids(&result), vec!["WEB002", "RTMP002"]);
}

#[test]
fn test_exact_date_prefilter_is_anded_with_or_query() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query {
        tokens: vec![
            token("deliveryMethod", Operator::Equals, "Web"),
            token("requests", Operator::Greater, "8000"),
        ],
        operation: Operation::Or,
    };

    let result = FilterEvaluator::new(&query, &context)
        .with_exact_date(Some("2024-01-20"))
        .filter_records(&records);
    assert_eq!(ids(&result), vec!["WEB002"]);
}

#[test]
fn test_empty_exact_date_is_ignored() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let query = Query::new();

    let result = FilterEvaluator::new(&query, &context)
        .with_exact_date(Some(""))
        .filter_records(&records);
    assert_eq!(result.len(), 4);
}

#[test]
fn test_custom_date_property() {
    let records = vec![
        Record::new("A").with("updated", "2024-03-01"),
        Record::new("B").with("updated", "2024-03-02"),
    ];
    let context = FilterContext::new(&[]).with_date_property("updated");
    let query = Query::new();

    let result = FilterEvaluator::new(&query, &context)
        .with_exact_date(Some("2024-03-02"))
        .filter_records(&records);
    assert_eq!(ids(&result), vec!["B"]);
    assert_eq!(context.date_property(), "updated");
}

#[test]
fn test_and_equals_sequential_intersection() {
    let records = sample();
    let props = declared();
    let context = FilterContext::new(&props);
    let tokens = vec![
        token("logging", Operator::Equals, "false"),
        token("requests", Operator::LessOrEqual, "5000"),
        token("id", Operator::Contains, "0"),
    ];

    let combined = Query::and(tokens.clone());
    let all = FilterEvaluator::new(&combined, &context).filter_records(&records);

    let mut narrowed: Vec<Record> = records.clone();
    for t in tokens {
        let single = Query::and(vec![t]);
        narrowed = FilterEvaluator::new(&single, &context)
            .filter_records(&narrowed)
            .into_iter()
            .cloned()
            .collect();
    }

    let narrowed_ids: Vec<String> = narrowed.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids(&all), narrowed_ids);
}
