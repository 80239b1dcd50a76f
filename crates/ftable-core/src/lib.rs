//! Filtering engine for tabular records.
//!
//! This crate evaluates property-based queries against a heterogeneous set of
//! records, derives dependent filter options from the filtered result, and
//! manages named saved filter sets persisted as JSON.
//!
//! # Example
//!
//! ```
//! use ftable_core::filter::{FilterContext, FilterEvaluator, Operator, Query, Token};
//! use ftable_core::{FilteringProperty, PropertyType, Record};
//!
//! let properties = vec![FilteringProperty::new("requests", "Requests", PropertyType::Number)];
//! let records = vec![
//!     Record::new("A").with("requests", 5000),
//!     Record::new("B").with("requests", 120),
//! ];
//!
//! let query = Query::and(vec![Token::new("requests", Operator::GreaterOrEqual, "5000")]);
//! let context = FilterContext::new(&properties);
//! let evaluator = FilterEvaluator::new(&query, &context);
//!
//! let matched = evaluator.filter_records(&records);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0].id(), "A");
//! ```

pub mod collection;
mod error;
pub mod filter;
mod property;
mod record;
pub mod saved;
pub mod table;

pub use collection::{Page, Pagination, Selection, SelectionType, Sorting, DEFAULT_PAGE_SIZE};
pub use error::{DataError, DataResult};
pub use property::{infer_properties, load_properties, FilteringProperty, PropertyType};
pub use record::{load_records, Record, Value, ID_KEY};
pub use saved::{
    FilterStorage, JsonFileStorage, MemoryStorage, SavedFilter, SavedFilterStore,
    SavedFilterUpdate, StorageError,
};
pub use table::{FilterAction, FilterActionKind, FilterableTable};
