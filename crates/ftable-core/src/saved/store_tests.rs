use std::cell::Cell;
use std::io;

use super::*;
use crate::filter::{Operation, Operator, Query, Token};
use crate::saved::storage::Result as StorageResult;
use crate::saved::{MemoryStorage, StorageError, ID_PREFIX};

/// Storage whose reads succeed with nothing and whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    save_attempts: Cell<usize>,
}

impl FilterStorage for ReadOnlyStorage {
    fn load(&self) -> StorageResult<Option<Vec<SavedFilter>>> {
        Ok(None)
    }

    fn save(&self, _filters: &[SavedFilter]) -> StorageResult<()> {
        self.save_attempts.set(self.save_attempts.get() + 1);
        Err(StorageError::WriteError {
            path: "read-only".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

fn pending_query() -> Query {
    Query::and(vec![Token::new("state", Operator::Equals, "Pending")])
}

fn ids<S: FilterStorage>(store: &SavedFilterStore<S>) -> Vec<&str> {
    store.filters().iter().map(|f| f.id.as_str()).collect()
}

// ==================== Loading ====================

#[test]
fn test_load_empty_storage_seeds_defaults() {
    let store = SavedFilterStore::load(MemoryStorage::new());

    assert_eq!(
        ids(&store),
        vec![
            "default-active-web",
            "default-high-traffic",
            "default-logging-disabled"
        ]
    );
    assert!(store.filters().iter().all(|f| f.is_default));
    assert!(store.selected_id().is_none());
}

#[test]
fn test_seeded_defaults_are_persisted() {
    let store = SavedFilterStore::load(MemoryStorage::new());

    let persisted = store.storage().load().unwrap().unwrap();
    assert_eq!(persisted, store.filters());
}

#[test]
fn test_load_existing_entries_skips_defaults() {
    let storage = MemoryStorage::new();
    storage
        .save(&[SavedFilter::new("Mine", pending_query())])
        .unwrap();

    let store = SavedFilterStore::load(storage);
    assert_eq!(store.len(), 1);
    assert_eq!(store.filters()[0].name, "Mine");
}

#[test]
fn test_load_empty_array_stays_empty() {
    let store = SavedFilterStore::load(MemoryStorage::with_contents("[]"));
    assert!(store.is_empty());
}

#[test]
fn test_load_corrupt_storage_falls_back_to_defaults() {
    let store = SavedFilterStore::load(MemoryStorage::with_contents("definitely not json"));

    assert_eq!(store.len(), 3);
    assert!(store.get("default-high-traffic").is_some());

    // The corrupt text is replaced by the seeded defaults.
    let persisted = store.storage().load().unwrap().unwrap();
    assert_eq!(persisted.len(), 3);
}

#[test]
fn test_default_queries() {
    let store = SavedFilterStore::load(MemoryStorage::new());

    let web = store.get("default-active-web").unwrap();
    assert_eq!(web.query.operation, Operation::And);
    assert_eq!(web.query.to_string(), "state = Activated AND deliveryMethod = Web");

    let traffic = store.get("default-high-traffic").unwrap();
    assert_eq!(traffic.query.to_string(), "requests >= 5000");

    let logging = store.get("default-logging-disabled").unwrap();
    assert_eq!(logging.query.to_string(), "logging = false");
    assert_eq!(logging.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
}

// ==================== Save ====================

#[test]
fn test_save_appends_and_persists() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());

    let saved = store.save("Pending only", &pending_query()).unwrap();

    assert!(saved.id.starts_with(ID_PREFIX));
    assert!(!saved.is_default);
    assert_eq!(saved.query, pending_query());
    assert_eq!(store.filters().last(), Some(&saved));

    let persisted = store.storage().load().unwrap().unwrap();
    assert_eq!(persisted.last(), Some(&saved));
}

#[test]
fn test_save_trims_name() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    let saved = store.save("  Pending  ", &pending_query()).unwrap();
    assert_eq!(saved.name, "Pending");
}

#[test]
fn test_save_blank_name_is_noop() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    let before = store.storage().contents();

    assert!(store.save("   ", &pending_query()).is_none());
    assert!(store.save("", &pending_query()).is_none());

    assert_eq!(store.len(), 3);
    assert_eq!(store.storage().contents(), before);
}

#[test]
fn test_save_snapshots_query() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    let mut query = pending_query();

    let saved = store.save("Snapshot", &query).unwrap();
    query.tokens.clear();

    assert_eq!(store.get(&saved.id).unwrap().query.tokens.len(), 1);
}

#[test]
fn test_save_generates_unique_ids() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    let a = store.save("A", &pending_query()).unwrap();
    let b = store.save("B", &pending_query()).unwrap();
    assert_ne!(a.id, b.id);
}

// ==================== Delete ====================

#[test]
fn test_delete_removes_entry() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());

    assert!(store.delete("default-high-traffic"));
    assert_eq!(
        ids(&store),
        vec!["default-active-web", "default-logging-disabled"]
    );

    let persisted = store.storage().load().unwrap().unwrap();
    assert_eq!(persisted.len(), 2);
}

#[test]
fn test_delete_unknown_id() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    assert!(!store.delete("filter-missing"));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    store.select(Some("default-active-web"));

    store.delete("default-active-web");

    assert!(store.selected_id().is_none());
    assert!(store.selected().is_none());
}

#[test]
fn test_delete_other_keeps_selection() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    store.select(Some("default-active-web"));

    store.delete("default-high-traffic");

    assert_eq!(store.selected_id(), Some("default-active-web"));
}

// ==================== Selection ====================

#[test]
fn test_select_and_clear() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());

    store.select(Some("default-logging-disabled"));
    assert_eq!(store.selected().unwrap().name, "Logging disabled");

    store.select(None);
    assert!(store.selected_id().is_none());

    store.select(Some("default-logging-disabled"));
    store.clear_selection();
    assert!(store.selected_id().is_none());
}

#[test]
fn test_select_none_is_idempotent() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    store.select(Some("default-high-traffic"));
    let persisted = store.storage().contents();
    let filters = store.filters().to_vec();

    store.select(None);
    assert!(store.selected_id().is_none());

    store.select(None);
    assert!(store.selected_id().is_none());
    assert!(store.selected().is_none());
    assert_eq!(store.storage().contents(), persisted);
    assert_eq!(store.filters(), filters.as_slice());
}

#[test]
fn test_select_stale_id_resolves_to_nothing() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    store.select(Some("filter-gone"));

    assert_eq!(store.selected_id(), Some("filter-gone"));
    assert!(store.selected().is_none());
}

#[test]
fn test_selection_is_not_persisted() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    store.select(Some("default-active-web"));

    let contents = store.storage().contents().unwrap();
    let reopened = SavedFilterStore::load(MemoryStorage::with_contents(contents));
    assert!(reopened.selected_id().is_none());
}

// ==================== Update ====================

#[test]
fn test_update_name_and_query() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());

    let updated = store.update(
        "default-high-traffic",
        SavedFilterUpdate::new()
            .name("Very high traffic")
            .query(Query::and(vec![Token::new(
                "requests",
                Operator::Greater,
                "10000",
            )])),
    );

    assert!(updated);
    let filter = store.get("default-high-traffic").unwrap();
    assert_eq!(filter.name, "Very high traffic");
    assert_eq!(filter.query.to_string(), "requests > 10000");
    assert!(filter.is_default);

    let persisted = store.storage().load().unwrap().unwrap();
    assert_eq!(persisted[1].name, "Very high traffic");
}

#[test]
fn test_update_blank_name_is_ignored() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());

    assert!(store.update(
        "default-high-traffic",
        SavedFilterUpdate::new().name("  ").is_default(false),
    ));

    let filter = store.get("default-high-traffic").unwrap();
    assert_eq!(filter.name, "High traffic");
    assert!(!filter.is_default);
}

#[test]
fn test_update_unknown_id() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    assert!(!store.update("nope", SavedFilterUpdate::new().name("x")));
}

// ==================== Persistence Failures ====================

#[test]
fn test_write_failures_are_swallowed() {
    let mut store = SavedFilterStore::load(ReadOnlyStorage::default());
    assert_eq!(store.storage().save_attempts.get(), 1);
    assert_eq!(store.len(), 3);

    let saved = store.save("Pending", &pending_query()).unwrap();
    assert_eq!(store.len(), 4);
    assert!(store.delete(&saved.id));
    assert_eq!(store.len(), 3);

    assert_eq!(store.storage().save_attempts.get(), 3);
}

// ==================== Reload ====================

#[test]
fn test_reload_keeps_selection() {
    let mut store = SavedFilterStore::load(MemoryStorage::new());
    let saved = store.save("Pending", &pending_query()).unwrap();
    store.select(Some(&saved.id));

    store.reload();

    assert_eq!(store.len(), 4);
    assert_eq!(store.selected().map(|f| f.id.as_str()), Some(saved.id.as_str()));
}
