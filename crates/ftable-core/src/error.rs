//! Errors raised while loading records and property declarations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for record and property loading.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while reading input data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A record has no `id` property.
    #[error("record is missing the required \"id\" property")]
    MissingId,

    /// A record's `id` property is not a string.
    #[error("record id must be a string, found {found}")]
    InvalidId {
        /// Rendering of the offending value.
        found: String,
    },

    /// I/O error while reading an input file.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The input file is not valid JSON for the expected shape.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        /// The path being parsed.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
