//! Output formatting utilities for the ftable CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`records`] - Filtered record pages (list)
//! - [`options`] - Candidate values per property (options)
//! - [`properties`] - Property declarations and their operators (properties)
//! - [`saved`] - Saved filter sets (list, show, save, rename, delete)
//! - [`helpers`] - Common formatting utilities (truncation, padding, values)

pub mod helpers;
mod options;
mod properties;
mod records;
mod saved;

// Records
pub use records::{format_records_json, format_records_table};

// Options
pub use options::{format_options_json, format_options_table};

// Properties
pub use properties::{format_properties_json, format_properties_table};

// Saved filters
pub use saved::{
    format_saved_change, format_saved_details_json, format_saved_details_table,
    format_saved_json, format_saved_table,
};
