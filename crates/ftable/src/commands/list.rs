//! List command implementation.
//!
//! Lists one page of records matching the working query, optionally sorted,
//! starting from a saved filter, and with rows marked as selected.

use ftable_core::{FilterStorage, FilterableTable, Sorting, ID_KEY};
use tracing::debug;

use super::{apply_query_args, find_property, CommandContext, CommandError, DataSources, Result};
use crate::cli::QueryArgs;
use crate::output::{format_records_json, format_records_table};

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Query options.
    pub query: QueryArgs,
    /// Page to show (1-based).
    pub page: usize,
    /// Rows per page, overriding the configured size.
    pub page_size: Option<usize>,
    /// Sort property key.
    pub sort: Option<String>,
    /// Reverse sort order.
    pub reverse: bool,
    /// Row IDs to mark as selected.
    pub select: Vec<String>,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the data cannot be loaded, a filter token or date is
/// invalid, or the sort property is not declared.
pub fn execute(ctx: &CommandContext, sources: &DataSources, opts: &ListOptions) -> Result<()> {
    let table = sources.open_table()?;
    let table = configure(ctx, table, opts)?;

    if ctx.json_output {
        let output = format_records_json(&table)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_records_table(&table, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Applies the list options to `table`.
fn configure<S: FilterStorage>(
    ctx: &CommandContext,
    mut table: FilterableTable<S>,
    opts: &ListOptions,
) -> Result<FilterableTable<S>> {
    if let Some(page_size) = opts.page_size {
        if page_size == 0 {
            return Err(CommandError::Config(
                "Page size must be at least 1".to_string(),
            ));
        }
        table = table.with_page_size(page_size);
    }

    apply_query_args(ctx, &mut table, &opts.query)?;

    if let Some(field) = &opts.sort {
        if field != ID_KEY {
            find_property(table.properties(), field)?;
        }
        let sorting = if opts.reverse {
            Sorting::descending(field.as_str())
        } else {
            Sorting::ascending(field.as_str())
        };
        table.sort_by(Some(sorting));
    }

    table.set_page(opts.page);

    if !opts.select.is_empty() {
        let visible: Vec<String> = table.filtered().iter().map(|r| r.id().to_string()).collect();
        for id in &opts.select {
            if visible.contains(id) {
                table.select_row(id);
            } else if !ctx.quiet {
                eprintln!("Warning: row '{id}' is not among the filtered records");
            }
        }
    }

    debug!(
        total = table.filtered_count(),
        page = opts.page,
        "listing records"
    );

    Ok(table)
}
