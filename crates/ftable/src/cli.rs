//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the ftable CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ftable - Filter, page and save queries over JSON record tables
#[derive(Parser, Debug)]
#[command(name = "ftable")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Records file (JSON array of objects with a string "id")
    #[arg(long, global = true, env = "FTABLE_RECORDS")]
    pub records: Option<PathBuf>,

    /// Property declarations file (default: inferred from the records)
    #[arg(long, global = true)]
    pub properties: Option<PathBuf>,

    /// Saved filters file (default: XDG data directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Query options shared by commands that evaluate a filter.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Filter token, e.g. "state=Activated" or "requests>=5000" (repeatable)
    #[arg(short, long = "filter", value_name = "TOKEN", action = clap::ArgAction::Append)]
    pub filters: Vec<String>,

    /// Match records satisfying any token instead of all
    #[arg(long)]
    pub or: bool,

    /// Only records whose date property equals this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start from a saved filter (full ID or unique prefix)
    #[arg(short, long)]
    pub saved: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List filtered records
    #[command(alias = "l")]
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (default: from config, or 20)
        #[arg(long)]
        page_size: Option<usize>,

        /// Sort by property key
        #[arg(long)]
        sort: Option<String>,

        /// Reverse sort order
        #[arg(long, requires = "sort")]
        reverse: bool,

        /// Mark a row as selected (repeatable)
        #[arg(long = "select", value_name = "ID", action = clap::ArgAction::Append)]
        select: Vec<String>,
    },

    /// Show the candidate values for each property among the filtered records
    #[command(alias = "o")]
    Options {
        #[command(flatten)]
        query: QueryArgs,

        /// Only show values for this property key
        #[arg(long)]
        property: Option<String>,
    },

    /// Manage saved filter sets
    Saved {
        #[command(subcommand)]
        command: Option<SavedCommands>,
    },

    /// Show the filterable properties and their operators
    #[command(alias = "props")]
    Properties,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Saved filter subcommands
#[derive(Subcommand, Debug)]
pub enum SavedCommands {
    /// List saved filters (default)
    List,

    /// Show saved filter details
    Show {
        /// Saved filter ID (full ID or unique prefix)
        filter_id: String,
    },

    /// Save a query under a name
    Save {
        /// Display name
        name: String,

        /// Filter token (repeatable)
        #[arg(short, long = "filter", value_name = "TOKEN", action = clap::ArgAction::Append)]
        filters: Vec<String>,

        /// Combine tokens with OR instead of AND
        #[arg(long)]
        or: bool,
    },

    /// Rename a saved filter
    Rename {
        /// Saved filter ID (full ID or unique prefix)
        filter_id: String,

        /// New name
        name: String,
    },

    /// Delete a saved filter
    Delete {
        /// Saved filter ID (full ID or unique prefix)
        filter_id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Discard all saved filters and restore the defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
