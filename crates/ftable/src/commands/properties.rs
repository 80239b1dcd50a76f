//! Properties command implementation.
//!
//! Lists the filterable properties, from the declarations file or inferred
//! from the records, with the operators each one accepts.

use ftable_core::load_records;

use super::{CommandContext, CommandError, DataSources, Result};
use crate::output::{format_properties_json, format_properties_table};

/// Executes the properties command.
///
/// Declarations are read without loading the records when a declarations
/// file is configured.
///
/// # Errors
///
/// Returns an error if neither a declarations file nor a records file is
/// configured, or if either cannot be read.
pub fn execute(ctx: &CommandContext, sources: &DataSources) -> Result<()> {
    let properties = match (&sources.properties, &sources.records) {
        (Some(_), _) => sources.load_properties(&[])?,
        (None, Some(records)) => sources.load_properties(&load_records(records)?)?,
        (None, None) => {
            return Err(CommandError::Config(
                "No property declarations or records file. Use --properties <PATH> or --records <PATH>"
                    .to_string(),
            ))
        }
    };

    if ctx.json_output {
        let output = format_properties_json(&properties)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_properties_table(&properties, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
