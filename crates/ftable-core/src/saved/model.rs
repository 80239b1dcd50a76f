//! Saved filter set model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::Query;

/// Prefix of generated saved filter ids.
pub const ID_PREFIX: &str = "filter-";

/// A named snapshot of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    /// Unique identifier, `filter-<uuid>` for user-created entries.
    pub id: String,

    /// Display name. Never blank.
    pub name: String,

    /// The stored query. Applying a saved filter copies this.
    #[serde(default)]
    pub query: Query,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,

    /// True for seeded entries; used for labeling only.
    #[serde(default)]
    pub is_default: bool,
}

impl SavedFilter {
    /// Creates a user entry with a fresh id and the current time.
    pub fn new(name: impl Into<String>, query: Query) -> Self {
        Self {
            id: format!("{ID_PREFIX}{}", uuid::Uuid::new_v4()),
            name: name.into(),
            query,
            created_at: Utc::now(),
            is_default: false,
        }
    }

    /// Applies the fields present in `update`.
    ///
    /// A blank name is ignored so the entry never loses its name.
    pub(crate) fn apply(&mut self, update: SavedFilterUpdate) {
        if let Some(name) = update.name {
            let name = name.trim();
            if !name.is_empty() {
                self.name = name.to_string();
            }
        }
        if let Some(query) = update.query {
            self.query = query;
        }
        if let Some(is_default) = update.is_default {
            self.is_default = is_default;
        }
    }
}

/// Partial update of a [`SavedFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedFilterUpdate {
    /// New name.
    pub name: Option<String>,
    /// Replacement query.
    pub query: Option<Query>,
    /// New default flag.
    pub is_default: Option<bool>,
}

impl SavedFilterUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement query.
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the default flag.
    pub fn is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }
}
