//! Command implementations for the ftable CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod list;
mod lookups;
pub mod options;
pub mod properties;
pub mod saved;

use std::path::PathBuf;

use chrono::NaiveDate;
use ftable_core::filter::{Operation, Query, TokenParser};
use ftable_core::{
    infer_properties, load_properties, load_records, FilterStorage, FilterableTable,
    FilteringProperty, JsonFileStorage, SavedFilterStore, SelectionType, DEFAULT_PAGE_SIZE,
};
use tracing::debug;

use crate::cli::{Cli, QueryArgs};
use config::Config;

pub use lookups::{find_property, find_saved_by_id_or_prefix, unknown_property_warnings};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter token parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] ftable_core::filter::FilterError),

    /// Saved filter storage error.
    #[error("storage error: {0}")]
    Storage(#[from] ftable_core::StorageError),

    /// Records or property declarations could not be loaded.
    #[error("data error: {0}")]
    Data(#[from] ftable_core::DataError),

    /// Configuration or usage error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and configuration.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

/// Where the table's data comes from and how it is presented.
///
/// Command line flags take priority over the config file.
#[derive(Debug, Clone)]
pub struct DataSources {
    /// Records file.
    pub records: Option<PathBuf>,
    /// Property declarations file.
    pub properties: Option<PathBuf>,
    /// Saved filters file. `None` uses the XDG data path.
    pub store: Option<PathBuf>,
    /// Rows per page.
    pub page_size: usize,
    /// Property compared by `--date`.
    pub date_property: Option<String>,
    /// Row selection mode.
    pub selection_type: SelectionType,
}

impl DataSources {
    /// Resolves data sources from CLI flags, falling back to the config.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            records: cli
                .records
                .clone()
                .or_else(|| config.records.as_ref().map(PathBuf::from)),
            properties: cli
                .properties
                .clone()
                .or_else(|| config.properties.as_ref().map(PathBuf::from)),
            store: cli
                .store
                .clone()
                .or_else(|| config.store.as_ref().map(PathBuf::from)),
            page_size: config.table.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            date_property: config.table.date_property.clone(),
            selection_type: config.table.selection_type.unwrap_or_default(),
        }
    }

    /// Opens the saved filter storage.
    pub fn storage(&self) -> Result<JsonFileStorage> {
        match &self.store {
            Some(path) => Ok(JsonFileStorage::with_path(path.clone())),
            None => Ok(JsonFileStorage::new()?),
        }
    }

    /// Loads the saved filter store.
    pub fn open_store(&self) -> Result<SavedFilterStore<JsonFileStorage>> {
        let storage = self.storage()?;
        debug!(path = %storage.path().display(), "opening saved filters");
        Ok(SavedFilterStore::load(storage))
    }

    /// Loads the property declarations, inferring them from `records` when
    /// no declarations file is configured.
    pub fn load_properties(
        &self,
        records: &[ftable_core::Record],
    ) -> Result<Vec<FilteringProperty>> {
        match &self.properties {
            Some(path) => Ok(load_properties(path)?),
            None => {
                debug!("no property declarations; inferring from records");
                Ok(infer_properties(records))
            }
        }
    }

    /// Loads records, properties and saved filters into a table.
    pub fn open_table(&self) -> Result<FilterableTable<JsonFileStorage>> {
        let Some(records_path) = &self.records else {
            return Err(CommandError::Config(
                "No records file. Use --records <PATH> or 'ftable config set records <PATH>'"
                    .to_string(),
            ));
        };

        let records = load_records(records_path)?;
        let properties = self.load_properties(&records)?;
        debug!(
            records = records.len(),
            properties = properties.len(),
            "loaded table data"
        );

        let mut table = FilterableTable::new(records, properties, self.open_store()?)
            .with_page_size(self.page_size)
            .with_selection_type(self.selection_type);
        if let Some(date_property) = &self.date_property {
            table = table.with_date_property(date_property.clone());
        }
        Ok(table)
    }
}

/// Parses `--filter` tokens into a query.
pub fn parse_query(filters: &[String], or: bool) -> Result<Query> {
    let operation = if or { Operation::Or } else { Operation::And };
    Ok(TokenParser::parse_query(filters, operation)?)
}

/// Validates a `--date` value.
pub fn parse_date(date: &str) -> Result<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| {
            CommandError::Config(format!(
                "Invalid date '{date}'. Expected YYYY-MM-DD"
            ))
        })
}

/// Applies the query options to `table`.
///
/// A saved filter is applied first; tokens given with `--filter` are added to
/// its query, and `--or` switches the combined query to OR.
pub fn apply_query_args<S: FilterStorage>(
    ctx: &CommandContext,
    table: &mut FilterableTable<S>,
    args: &QueryArgs,
) -> Result<()> {
    if let Some(id) = &args.saved {
        let id = find_saved_by_id_or_prefix(table.saved_filters(), id)?
            .id
            .clone();
        table.apply_saved(Some(&id));
    }

    let extra = parse_query(&args.filters, args.or)?;
    for token in extra.tokens {
        table.add_token(token);
    }
    if args.or {
        table.set_operation(Operation::Or);
    }

    if let Some(date) = &args.date {
        table.set_date_filter(Some(parse_date(date)?));
    }

    if !ctx.quiet {
        for warning in unknown_property_warnings(table.query(), table.properties()) {
            eprintln!("Warning: {warning}");
        }
    }

    Ok(())
}
