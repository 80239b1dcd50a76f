//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by what they need: standalone commands only read the
//! command line and config, data commands also need the resolved records,
//! property declarations and saved filter store.

use crate::cli::{Cli, Commands, ConfigCommands, QueryArgs, SavedCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, DataSources, Result};

/// Trait for commands that run without table data.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read records or saved filters.
pub trait DataCommand {
    /// Execute the command against the resolved data sources.
    fn execute(&self, ctx: &CommandContext, sources: &DataSources) -> Result<()>;
}

/// Commands that don't need table data.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs table data.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("ftable - Filter, page and save queries over JSON record tables");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that need table data.
pub enum DataDispatch<'a> {
    List {
        query: &'a QueryArgs,
        page: usize,
        page_size: Option<usize>,
        sort: &'a Option<String>,
        reverse: bool,
        select: &'a [String],
    },
    Options {
        query: &'a QueryArgs,
        property: &'a Option<String>,
    },
    Properties,
    Saved(&'a Option<SavedCommands>),
}

impl<'a> DataDispatch<'a> {
    /// Create a data dispatch from the CLI command.
    /// Returns None for standalone commands (use StandaloneDispatch first).
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                query,
                page,
                page_size,
                sort,
                reverse,
                select,
            }) => Some(Self::List {
                query,
                page: *page,
                page_size: *page_size,
                sort,
                reverse: *reverse,
                select,
            }),
            Some(Commands::Options { query, property }) => Some(Self::Options { query, property }),
            Some(Commands::Properties) => Some(Self::Properties),
            Some(Commands::Saved { command }) => Some(Self::Saved(command)),
            _ => None,
        }
    }
}

impl DataCommand for DataDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, sources: &DataSources) -> Result<()> {
        match self {
            Self::List {
                query,
                page,
                page_size,
                sort,
                reverse,
                select,
            } => {
                let opts = commands::list::ListOptions {
                    query: (*query).clone(),
                    page: *page,
                    page_size: *page_size,
                    sort: (*sort).clone(),
                    reverse: *reverse,
                    select: select.to_vec(),
                };
                commands::list::execute(ctx, sources, &opts)
            }
            Self::Options { query, property } => {
                let opts = commands::options::OptionsOptions {
                    query: (*query).clone(),
                    property: (*property).clone(),
                };
                commands::options::execute(ctx, sources, &opts)
            }
            Self::Properties => commands::properties::execute(ctx, sources),
            Self::Saved(command) => dispatch_saved(ctx, sources, command),
        }
    }
}

/// Dispatch saved filter subcommands.
fn dispatch_saved(
    ctx: &CommandContext,
    sources: &DataSources,
    command: &Option<SavedCommands>,
) -> Result<()> {
    match command {
        Some(SavedCommands::List) | None => commands::saved::execute(ctx, sources),
        Some(SavedCommands::Show { filter_id }) => {
            commands::saved::execute_show(ctx, sources, filter_id)
        }
        Some(SavedCommands::Save { name, filters, or }) => {
            let opts = commands::saved::SavedSaveOptions {
                name: name.clone(),
                filters: filters.clone(),
                or: *or,
            };
            commands::saved::execute_save(ctx, sources, &opts)
        }
        Some(SavedCommands::Rename { filter_id, name }) => {
            let opts = commands::saved::SavedRenameOptions {
                filter_id: filter_id.clone(),
                name: name.clone(),
            };
            commands::saved::execute_rename(ctx, sources, &opts)
        }
        Some(SavedCommands::Delete { filter_id, force }) => {
            let opts = commands::saved::SavedDeleteOptions {
                filter_id: filter_id.clone(),
                force: *force,
            };
            commands::saved::execute_delete(ctx, sources, &opts)
        }
        Some(SavedCommands::Reset { force }) => {
            commands::saved::execute_reset(ctx, sources, *force)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_standalone_commands() {
        for args in [
            vec!["ftable"],
            vec!["ftable", "config", "path"],
            vec!["ftable", "completions", "bash"],
        ] {
            let cli = Cli::parse_from(args);
            assert!(StandaloneDispatch::try_from_cli(&cli).is_some());
            assert!(DataDispatch::from_cli(&cli).is_none());
        }
    }

    #[test]
    fn test_data_commands() {
        for args in [
            vec!["ftable", "list"],
            vec!["ftable", "options"],
            vec!["ftable", "properties"],
            vec!["ftable", "saved"],
        ] {
            let cli = Cli::parse_from(args);
            assert!(StandaloneDispatch::try_from_cli(&cli).is_none());
            assert!(DataDispatch::from_cli(&cli).is_some());
        }
    }

    #[test]
    fn test_list_dispatch_fields() {
        let cli = Cli::parse_from([
            "ftable", "list", "--page", "3", "--page-size", "5", "--select", "A",
        ]);
        match DataDispatch::from_cli(&cli) {
            Some(DataDispatch::List {
                page,
                page_size,
                select,
                ..
            }) => {
                assert_eq!(page, 3);
                assert_eq!(page_size, Some(5));
                assert_eq!(select, ["A"]);
            }
            _ => panic!("Expected List dispatch"),
        }
    }
}
