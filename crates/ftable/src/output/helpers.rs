//! Common helper functions for output formatting.

use ftable_core::saved::ID_PREFIX;
use ftable_core::Value;
use owo_colors::OwoColorize;

/// Characters of the uuid kept when shortening a saved filter ID.
const SHORT_UUID_LEN: usize = 8;

/// Shortens a generated saved filter ID to its prefix plus the first uuid
/// characters. Seeded IDs are returned unchanged.
pub fn short_filter_id(id: &str) -> String {
    match id.strip_prefix(ID_PREFIX) {
        Some(uuid) if uuid.chars().count() > SHORT_UUID_LEN => {
            let head: String = uuid.chars().take(SHORT_UUID_LEN).collect();
            format!("{ID_PREFIX}{head}")
        }
        _ => id.to_string(),
    }
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

/// Pads `s` to `width` characters.
///
/// Padding is computed on the plain text so colored cells line up.
pub fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(len)))
}

/// Formats a record value for a table cell.
pub fn format_value(value: Option<&Value>, use_colors: bool) -> String {
    let Some(value) = value else {
        return String::new();
    };

    match value {
        Value::Bool(true) if use_colors => "true".green().to_string(),
        Value::Bool(false) if use_colors => "false".red().to_string(),
        other => other.to_string(),
    }
}

/// Dims `s` when colors are enabled.
pub fn dimmed(s: &str, use_colors: bool) -> String {
    if use_colors {
        s.dimmed().to_string()
    } else {
        s.to_string()
    }
}

/// Bolds `s` when colors are enabled.
pub fn bold(s: &str, use_colors: bool) -> String {
    if use_colors {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}
