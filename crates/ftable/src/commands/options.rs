//! Options command implementation.
//!
//! Shows the candidate values of each property among the records that pass
//! the current query, so every chosen filter narrows the other choices.

use ftable_core::filter::FilteringOption;
use ftable_core::{FilterStorage, FilterableTable, FilteringProperty};

use super::{apply_query_args, find_property, CommandContext, DataSources, Result};
use crate::cli::QueryArgs;
use crate::output::{format_options_json, format_options_table};

/// Options for the options command.
#[derive(Debug, Default)]
pub struct OptionsOptions {
    /// Query options.
    pub query: QueryArgs,
    /// Only show values for this property key.
    pub property: Option<String>,
}

/// Options derived for a configured table.
struct DerivedOptions {
    options: Vec<FilteringOption>,
    properties: Vec<FilteringProperty>,
    total: usize,
}

/// Executes the options command.
///
/// # Errors
///
/// Returns an error if the data cannot be loaded, the query is invalid, or
/// `--property` names an undeclared property.
pub fn execute(ctx: &CommandContext, sources: &DataSources, opts: &OptionsOptions) -> Result<()> {
    let mut table = sources.open_table()?;
    let derived = derive(ctx, &mut table, opts)?;

    if ctx.json_output {
        let output = format_options_json(&derived.options, &derived.properties, derived.total)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_options_table(&derived.options, &derived.properties, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

fn derive<S: FilterStorage>(
    ctx: &CommandContext,
    table: &mut FilterableTable<S>,
    opts: &OptionsOptions,
) -> Result<DerivedOptions> {
    apply_query_args(ctx, table, &opts.query)?;

    let mut options = table.options();
    let properties = match &opts.property {
        Some(key) => {
            let property = find_property(table.properties(), key)?.clone();
            options.retain(|o| o.property_key == property.key);
            vec![property]
        }
        None => table.properties().to_vec(),
    };

    Ok(DerivedOptions {
        options,
        properties,
        total: table.filtered_count(),
    })
}
