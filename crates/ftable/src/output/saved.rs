//! Saved filter output formatting.

use chrono::{DateTime, Utc};
use ftable_core::filter::Query;
use ftable_core::SavedFilter;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{bold, dimmed, short_filter_id, truncate_str};

/// JSON output structure for saved filters list command.
#[derive(Serialize)]
pub struct SavedListOutput<'a> {
    pub saved_filters: Vec<SavedOutput<'a>>,
}

/// JSON output structure for a single saved filter.
#[derive(Serialize)]
pub struct SavedOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub query: &'a Query,
    pub created_at: DateTime<Utc>,
    pub is_default: bool,
}

impl<'a> From<&'a SavedFilter> for SavedOutput<'a> {
    fn from(f: &'a SavedFilter) -> Self {
        Self {
            id: &f.id,
            name: &f.name,
            query: &f.query,
            created_at: f.created_at,
            is_default: f.is_default,
        }
    }
}

/// Formats saved filters as JSON.
pub fn format_saved_json(filters: &[SavedFilter]) -> Result<String, serde_json::Error> {
    let output = SavedListOutput {
        saved_filters: filters.iter().map(SavedOutput::from).collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats saved filters as a table.
pub fn format_saved_table(filters: &[SavedFilter], use_colors: bool) -> String {
    if filters.is_empty() {
        return "No saved filters.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<26} {:<4} {:<28} {}", "ID", "Def", "Name", "Query");
    output.push_str(&dimmed(&header, use_colors));
    output.push('\n');

    for filter in filters {
        let default = if filter.is_default {
            if use_colors {
                "✓".green().to_string()
            } else {
                "✓".to_string()
            }
        } else {
            " ".to_string()
        };
        let line = format!(
            "{:<26} {:<4} {:<28} {}",
            short_filter_id(&filter.id),
            default,
            truncate_str(&filter.name, 28),
            truncate_str(&filter.query.to_string(), 60)
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Formats saved filter details as JSON (saved show command).
pub fn format_saved_details_json(filter: &SavedFilter) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SavedOutput::from(filter))
}

/// Formats saved filter details as a human-readable table (saved show command).
pub fn format_saved_details_table(filter: &SavedFilter, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", bold("Saved filter:", use_colors), filter.name));
    output.push_str(&format!("ID: {}\n", filter.id));
    output.push_str(&format!(
        "Created: {}\n",
        filter.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if filter.is_default {
        output.push_str("Default: Yes\n");
    }
    output.push_str(&format!(
        "Match: {}\n",
        match filter.query.operation {
            ftable_core::filter::Operation::And => "all tokens",
            ftable_core::filter::Operation::Or => "any token",
        }
    ));

    if filter.query.is_empty() {
        output.push_str("Tokens: (none)\n");
    } else {
        output.push_str("Tokens:\n");
        for token in &filter.query.tokens {
            output.push_str(&format!("  {token}\n"));
        }
    }

    output
}

/// JSON output structure for a saved filter change (save, rename, delete).
#[derive(Serialize)]
pub struct SavedChangeOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: &'static str,
}

/// Formats a saved filter change as JSON.
pub fn format_saved_change(
    filter: &SavedFilter,
    status: &'static str,
) -> Result<String, serde_json::Error> {
    let output = SavedChangeOutput {
        id: &filter.id,
        name: &filter.name,
        status,
    };
    serde_json::to_string_pretty(&output)
}
