//! Pagination, sorting and row selection over filtered records.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::{Record, Value};

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// 1-based page position over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Creates pagination on page 1. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the requested page, which may exceed the page count.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to `page`. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Returns the number of pages needed for `total` rows, at least 1.
    pub fn pages_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Returns the current page clamped to the pages available for `total`.
    pub fn clamped_page(&self, total: usize) -> usize {
        self.current_page.min(self.pages_count(total))
    }

    /// Returns the rows of `items` on the (clamped) current page.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let page = self.clamped_page(items.len());
        let start = ((page - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Sort order over one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    /// Property key to sort by.
    pub field: String,
    /// Reverse the order of present values.
    pub descending: bool,
}

impl Sorting {
    /// Ascending sort by `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending sort by `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Sorts `records` in place.
    ///
    /// The sort is stable. Records without the field go last in both
    /// directions.
    pub fn sort(&self, records: &mut [&Record]) {
        records.sort_by(|a, b| {
            match (a.get(&self.field), b.get(&self.field)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => {
                    let ordering = compare_values(a, b);
                    if self.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                }
            }
        });
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Bool(_) => 1,
        Value::String(_) => 2,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    /// Selection is disabled.
    None,
    /// At most one row.
    Single,
    /// Any number of rows.
    #[default]
    Multi,
}

impl SelectionType {
    /// Returns the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionType::None => "none",
            SelectionType::Single => "single",
            SelectionType::Multi => "multi",
        }
    }
}

/// Selected row ids in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selection_type: SelectionType,
    ids: Vec<String>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new(selection_type: SelectionType) -> Self {
        Self {
            selection_type,
            ids: Vec::new(),
        }
    }

    /// Returns the selection mode.
    pub fn selection_type(&self) -> SelectionType {
        self.selection_type
    }

    /// Selects `id`. In single mode this replaces any previous selection.
    pub fn select(&mut self, id: &str) {
        match self.selection_type {
            SelectionType::None => {}
            SelectionType::Single => {
                self.ids.clear();
                self.ids.push(id.to_string());
            }
            SelectionType::Multi => {
                if !self.is_selected(id) {
                    self.ids.push(id.to_string());
                }
            }
        }
    }

    /// Deselects `id`.
    pub fn deselect(&mut self, id: &str) {
        self.ids.retain(|s| s != id);
    }

    /// Flips the selection state of `id`.
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns true if `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Returns the selected ids.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Drops ids that are not among `visible`.
    pub fn retain_visible(&mut self, visible: &[&Record]) {
        self.ids.retain(|id| visible.iter().any(|r| r.id() == id));
    }
}

/// One page of filtered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Rows on this page.
    pub records: Vec<&'a Record>,
    /// 1-based page number after clamping.
    pub current_page: usize,
    /// Number of pages, at least 1.
    pub pages_count: usize,
    /// Number of filtered rows across all pages.
    pub total: usize,
}
