//! Named saved filter sets.
//!
//! A [`SavedFilterStore`] owns the collection and a transient selection
//! pointer, and writes every change through a [`FilterStorage`] backend.

mod defaults;
mod model;
mod storage;
mod store;

pub use defaults::default_filters;
pub use model::{SavedFilter, SavedFilterUpdate, ID_PREFIX};
pub use storage::{FilterStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::SavedFilterStore;
