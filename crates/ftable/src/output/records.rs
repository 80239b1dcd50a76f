//! Record list output formatting.

use ftable_core::filter::Query;
use ftable_core::{FilterAction, FilterStorage, FilterableTable, Record, ID_KEY};
use serde::Serialize;

use super::helpers::{bold, dimmed, format_value, pad, truncate_str};

/// Widest a record cell is printed before truncation.
const MAX_CELL_WIDTH: usize = 24;

/// JSON output structure for the saved filter a listing started from.
#[derive(Serialize)]
pub struct AppliedSavedOutput<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct RecordsListOutput<'a> {
    pub query: &'a Query,
    pub date_filter: Option<&'a str>,
    pub saved_filter: Option<AppliedSavedOutput<'a>>,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub page_size: usize,
    pub records: Vec<&'a Record>,
    pub selected: &'a [String],
    pub actions: Vec<FilterAction>,
}

/// Formats the current page of `table` as JSON.
pub fn format_records_json<S: FilterStorage>(
    table: &FilterableTable<S>,
) -> Result<String, serde_json::Error> {
    let page = table.page();
    let saved = table.saved_filters();

    let output = RecordsListOutput {
        query: table.query(),
        date_filter: table.date_filter(),
        saved_filter: saved.selected_id().map(|id| AppliedSavedOutput {
            id,
            name: saved.selected().map(|f| f.name.as_str()),
        }),
        total: page.total,
        page: page.current_page,
        pages: page.pages_count,
        page_size: table.pagination().page_size(),
        records: page.records,
        selected: table.selection().ids(),
        actions: table.available_actions(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats the current page of `table` as a table.
///
/// Columns are `id` followed by the filterable properties in declaration
/// order. Selected rows are marked with `*`.
pub fn format_records_table<S: FilterStorage>(
    table: &FilterableTable<S>,
    use_colors: bool,
) -> String {
    let page = table.page();
    let mut output = String::new();

    if let Some(filter) = table.saved_filters().selected() {
        output.push_str(&format!("{} {}\n", bold("Saved filter:", use_colors), filter.name));
    }
    if table.is_filtering() {
        output.push_str(&format!("{} {}\n", bold("Filter:", use_colors), table.query()));
    }
    if let Some(date) = table.date_filter() {
        output.push_str(&format!(
            "{} {} = {}\n",
            bold("Date:", use_colors),
            table.date_property(),
            date
        ));
    }
    if !output.is_empty() {
        output.push('\n');
    }

    if page.records.is_empty() {
        output.push_str("No records found.\n");
        return output;
    }

    let mut columns: Vec<(&str, String)> = vec![(ID_KEY, "ID".to_string())];
    for property in table.properties() {
        if property.key != ID_KEY {
            columns.push((property.key.as_str(), property.label().to_string()));
        }
    }

    let rows: Vec<Vec<(String, String)>> = page
        .records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|(key, _)| {
                    let raw = format_value(record.get(key), false);
                    let plain = truncate_str(&raw, MAX_CELL_WIDTH);
                    let shown = if use_colors && plain == raw {
                        format_value(record.get(key), true)
                    } else {
                        plain.clone()
                    };
                    (plain, shown)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (_, label))| {
            let header = truncate_str(label, MAX_CELL_WIDTH).chars().count();
            rows.iter()
                .map(|row| row[i].0.chars().count())
                .fold(header, usize::max)
        })
        .collect();

    // Header
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((_, label), width)| pad(&truncate_str(label, MAX_CELL_WIDTH), *width))
        .collect();
    output.push_str(&format!(
        "{}\n",
        dimmed(&format!("  {}", header.join(" ")).trim_end(), use_colors)
    ));

    // Rows
    for (record, row) in page.records.iter().zip(&rows) {
        let marker = if table.selection().is_selected(record.id()) {
            "*"
        } else {
            " "
        };
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|((plain, shown), width)| {
                let padding = width.saturating_sub(plain.chars().count());
                format!("{shown}{}", " ".repeat(padding))
            })
            .collect();
        output.push_str(&format!("{marker} {}\n", cells.join(" ").trim_end()));
    }

    // Footer
    output.push('\n');
    output.push_str(&dimmed(
        &format!(
            "Page {} of {} ({} {})",
            page.current_page,
            page.pages_count,
            page.total,
            if page.total == 1 { "record" } else { "records" }
        ),
        use_colors,
    ));
    output.push('\n');

    output
}
