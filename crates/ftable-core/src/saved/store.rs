//! The saved filter store.

use tracing::{debug, warn};

use super::defaults::default_filters;
use super::model::{SavedFilter, SavedFilterUpdate};
use super::storage::FilterStorage;
use crate::filter::Query;

/// Owns the collection of saved filter sets and the selection pointer.
///
/// Every mutation updates the in-memory collection and then writes the whole
/// collection to the backing [`FilterStorage`]. Storage failures are logged
/// and otherwise ignored: reads fall back to the default entries, writes
/// leave the in-memory state authoritative for the rest of the session.
///
/// The selection pointer is not persisted.
///
/// # Example
///
/// ```
/// use ftable_core::filter::{Operator, Query, Token};
/// use ftable_core::{MemoryStorage, SavedFilterStore};
///
/// let mut store = SavedFilterStore::load(MemoryStorage::new());
/// let query = Query::and(vec![Token::new("state", Operator::Equals, "Pending")]);
///
/// let saved = store.save("Pending", &query).expect("name is not blank");
/// store.select(Some(&saved.id));
/// assert_eq!(store.selected().map(|f| f.name.as_str()), Some("Pending"));
///
/// store.delete(&saved.id);
/// assert!(store.selected_id().is_none());
/// ```
#[derive(Debug)]
pub struct SavedFilterStore<S> {
    storage: S,
    filters: Vec<SavedFilter>,
    selected_id: Option<String>,
}

impl<S: FilterStorage> SavedFilterStore<S> {
    /// Loads the store from `storage`.
    ///
    /// When nothing has been persisted yet, or the persisted data cannot be
    /// read, the default entries are seeded and written back.
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            storage,
            filters: Vec::new(),
            selected_id: None,
        };
        store.reload();
        store
    }

    /// Re-reads the collection from storage, keeping the selection pointer.
    pub fn reload(&mut self) {
        match self.storage.load() {
            Ok(Some(filters)) => {
                debug!(count = filters.len(), "loaded saved filters");
                self.filters = filters;
            }
            Ok(None) => {
                debug!("no saved filters persisted; seeding defaults");
                self.filters = default_filters();
                self.persist();
            }
            Err(e) => {
                warn!(error = %e, "failed to load saved filters; using defaults");
                self.filters = default_filters();
                self.persist();
            }
        }
    }

    /// Returns the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns all saved filters in insertion order.
    pub fn filters(&self) -> &[SavedFilter] {
        &self.filters
    }

    /// Returns the number of saved filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if there are no saved filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Finds a saved filter by id.
    pub fn get(&self, id: &str) -> Option<&SavedFilter> {
        self.filters.iter().find(|f| f.id == id)
    }

    /// Saves a snapshot of `query` under `name`.
    ///
    /// Returns `None` without changing anything if the trimmed name is empty.
    pub fn save(&mut self, name: &str, query: &Query) -> Option<SavedFilter> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let filter = SavedFilter::new(name, query.clone());
        self.filters.push(filter.clone());
        self.persist();
        Some(filter)
    }

    /// Deletes the saved filter with `id`.
    ///
    /// Clears the selection if it pointed at the deleted entry. Returns false
    /// if no entry had that id.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id != id);
        if self.filters.len() == before {
            return false;
        }

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        self.persist();
        true
    }

    /// Merges `update` into the saved filter with `id`.
    ///
    /// Returns false if no entry had that id.
    pub fn update(&mut self, id: &str, update: SavedFilterUpdate) -> bool {
        let Some(filter) = self.filters.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        filter.apply(update);
        self.persist();
        true
    }

    /// Sets or clears the selection pointer.
    ///
    /// The id is not validated; a stale id simply resolves to no entry.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected_id = id.map(str::to_string);
    }

    /// Clears the selection pointer.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Returns the selection pointer.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Returns the selected saved filter, if the pointer resolves.
    pub fn selected(&self) -> Option<&SavedFilter> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.filters) {
            warn!(error = %e, "failed to persist saved filters");
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
