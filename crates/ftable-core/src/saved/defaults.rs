//! Entries seeded into an empty store.

use chrono::{DateTime, Utc};

use super::model::SavedFilter;
use crate::filter::{Operator, Query, Token};

/// 2024-01-01T00:00:00Z
const SEED_TIMESTAMP: i64 = 1_704_067_200;

/// Returns the saved filters a store starts with when nothing is persisted.
///
/// - `default-active-web`: `state = Activated AND deliveryMethod = Web`
/// - `default-high-traffic`: `requests >= 5000`
/// - `default-logging-disabled`: `logging = false`
pub fn default_filters() -> Vec<SavedFilter> {
    let created_at = DateTime::<Utc>::from_timestamp(SEED_TIMESTAMP, 0).unwrap_or_default();

    let seed = |id: &str, name: &str, query: Query| SavedFilter {
        id: id.to_string(),
        name: name.to_string(),
        query,
        created_at,
        is_default: true,
    };

    vec![
        seed(
            "default-active-web",
            "Active web distributions",
            Query::and(vec![
                Token::new("state", Operator::Equals, "Activated"),
                Token::new("deliveryMethod", Operator::Equals, "Web"),
            ]),
        ),
        seed(
            "default-high-traffic",
            "High traffic",
            Query::and(vec![Token::new("requests", Operator::GreaterOrEqual, "5000")]),
        ),
        seed(
            "default-logging-disabled",
            "Logging disabled",
            Query::and(vec![Token::new("logging", Operator::Equals, "false")]),
        ),
    ]
}
