//! Saved command implementation.
//!
//! Lists and manages named saved filter sets. Every change is written
//! through to the store file; write failures are logged and the change is
//! kept for the rest of the run.

use ftable_core::{
    FilterStorage, JsonFileStorage, SavedFilter, SavedFilterStore, SavedFilterUpdate,
};
use tracing::debug;

use super::{find_saved_by_id_or_prefix, parse_query, CommandContext, CommandError, DataSources, Result};
use crate::output::{
    format_saved_change, format_saved_details_json, format_saved_details_table,
    format_saved_json, format_saved_table,
};

/// Executes the saved list command.
///
/// # Errors
///
/// Returns an error if the store path cannot be determined.
pub fn execute(ctx: &CommandContext, sources: &DataSources) -> Result<()> {
    let store = sources.open_store()?;

    if ctx.json_output {
        let output = format_saved_json(store.filters())?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_saved_table(store.filters(), ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

// ============================================================================
// Saved Show Command
// ============================================================================

/// Executes the saved show command.
///
/// # Errors
///
/// Returns an error if no saved filter matches `filter_id`.
pub fn execute_show(ctx: &CommandContext, sources: &DataSources, filter_id: &str) -> Result<()> {
    let store = sources.open_store()?;
    let filter = find_saved_by_id_or_prefix(&store, filter_id)?;

    if ctx.json_output {
        let output = format_saved_details_json(filter)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_saved_details_table(filter, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

// ============================================================================
// Saved Save Command
// ============================================================================

/// Options for the saved save command.
#[derive(Debug)]
pub struct SavedSaveOptions {
    /// Display name.
    pub name: String,
    /// Filter tokens.
    pub filters: Vec<String>,
    /// Combine tokens with OR.
    pub or: bool,
}

/// Executes the saved save command.
///
/// # Errors
///
/// Returns an error if the name is blank, no tokens are given, or a token
/// is invalid.
pub fn execute_save(
    ctx: &CommandContext,
    sources: &DataSources,
    opts: &SavedSaveOptions,
) -> Result<()> {
    let mut store = sources.open_store()?;
    let filter = save(&mut store, opts)?;

    if ctx.json_output {
        let output = format_saved_change(&filter, "saved")?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Saved filter: {} ({})", filter.name, filter.id);
    }

    Ok(())
}

fn save<S: FilterStorage>(
    store: &mut SavedFilterStore<S>,
    opts: &SavedSaveOptions,
) -> Result<SavedFilter> {
    let query = parse_query(&opts.filters, opts.or)?;
    if query.is_empty() {
        return Err(CommandError::Config(
            "Nothing to save. Give at least one --filter token".to_string(),
        ));
    }

    store
        .save(&opts.name, &query)
        .ok_or_else(|| CommandError::Config("Saved filter name cannot be empty".to_string()))
}

// ============================================================================
// Saved Rename Command
// ============================================================================

/// Options for the saved rename command.
#[derive(Debug)]
pub struct SavedRenameOptions {
    /// Saved filter ID (full ID or unique prefix).
    pub filter_id: String,
    /// New name.
    pub name: String,
}

/// Executes the saved rename command.
///
/// # Errors
///
/// Returns an error if no saved filter matches or the new name is blank.
pub fn execute_rename(
    ctx: &CommandContext,
    sources: &DataSources,
    opts: &SavedRenameOptions,
) -> Result<()> {
    let mut store = sources.open_store()?;
    let filter = rename(&mut store, opts)?;

    if ctx.json_output {
        let output = format_saved_change(&filter, "renamed")?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Renamed saved filter {} to: {}", filter.id, filter.name);
    }

    Ok(())
}

fn rename<S: FilterStorage>(
    store: &mut SavedFilterStore<S>,
    opts: &SavedRenameOptions,
) -> Result<SavedFilter> {
    if opts.name.trim().is_empty() {
        return Err(CommandError::Config(
            "Saved filter name cannot be empty".to_string(),
        ));
    }

    let id = find_saved_by_id_or_prefix(store, &opts.filter_id)?.id.clone();
    store.update(&id, SavedFilterUpdate::new().name(opts.name.as_str()));

    store
        .get(&id)
        .cloned()
        .ok_or_else(|| CommandError::Config(format!("Saved filter not found: {id}")))
}

// ============================================================================
// Saved Delete Command
// ============================================================================

/// Options for the saved delete command.
#[derive(Debug)]
pub struct SavedDeleteOptions {
    /// Saved filter ID (full ID or unique prefix).
    pub filter_id: String,
    /// Skip confirmation.
    pub force: bool,
}

/// Executes the saved delete command.
///
/// # Errors
///
/// Returns an error if no saved filter matches, or if `--force` is missing
/// outside quiet mode.
pub fn execute_delete(
    ctx: &CommandContext,
    sources: &DataSources,
    opts: &SavedDeleteOptions,
) -> Result<()> {
    let mut store = sources.open_store()?;
    let filter = find_saved_by_id_or_prefix(&store, &opts.filter_id)?.clone();

    // Confirm if not forced
    if !opts.force && !ctx.quiet {
        eprintln!("Delete saved filter '{}' ({})?", filter.name, filter.id);
        eprintln!("Use --force to skip this confirmation.");
        return Err(CommandError::Config(
            "Operation cancelled. Use --force to confirm.".to_string(),
        ));
    }

    store.delete(&filter.id);
    debug!(id = %filter.id, remaining = store.len(), "deleted saved filter");

    if ctx.json_output {
        let output = format_saved_change(&filter, "deleted")?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Deleted saved filter: {} ({})", filter.name, filter.id);
    }

    Ok(())
}

// ============================================================================
// Saved Reset Command
// ============================================================================

/// Executes the saved reset command.
///
/// Removes the store file and seeds the default entries again.
///
/// # Errors
///
/// Returns an error if the store file cannot be removed, or if `--force` is
/// missing outside quiet mode.
pub fn execute_reset(ctx: &CommandContext, sources: &DataSources, force: bool) -> Result<()> {
    let mut store = sources.open_store()?;

    if !force && !ctx.quiet {
        eprintln!(
            "Discard all {} saved filters and restore the defaults?",
            store.len()
        );
        eprintln!("Use --force to skip this confirmation.");
        return Err(CommandError::Config(
            "Operation cancelled. Use --force to confirm.".to_string(),
        ));
    }

    reset(&mut store)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "reset",
            "path": store.storage().path().display().to_string(),
            "saved_filters": store.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Restored {} default saved filters.", store.len());
    }

    Ok(())
}

fn reset(store: &mut SavedFilterStore<JsonFileStorage>) -> Result<()> {
    store.storage().delete()?;
    store.reload();
    Ok(())
}
