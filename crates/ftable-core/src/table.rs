//! Table state: records, the working query, saved filters and the
//! filter actions that tie them together.

use serde::Serialize;
use tracing::debug;

use crate::collection::{Page, Pagination, Selection, SelectionType, Sorting};
use crate::filter::{
    derive_options, FilterContext, FilterEvaluator, FilteringOption, Operation, Query, Token,
    DEFAULT_DATE_PROPERTY,
};
use crate::property::FilteringProperty;
use crate::record::Record;
use crate::saved::{FilterStorage, SavedFilter, SavedFilterStore};

/// Kind of a filter action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterActionKind {
    /// Reset the working query, saved selection and date filter.
    Clear,
    /// Save the working query as a new saved filter.
    Save,
    /// Delete the selected saved filter.
    Delete,
}

/// An entry of the filter actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterAction {
    /// What the action does.
    pub kind: FilterActionKind,
    /// True if the action is listed but cannot be performed.
    pub disabled: bool,
}

/// A filterable view over a fixed set of records.
///
/// The table owns the working query and the exact-date filter, evaluates
/// them against its records, and exposes the saved filter store through
/// the filter actions. Changing the filter moves back to page 1 and drops
/// selected rows that are no longer visible.
#[derive(Debug)]
pub struct FilterableTable<S> {
    records: Vec<Record>,
    properties: Vec<FilteringProperty>,
    date_property: String,
    query: Query,
    date_filter: Option<String>,
    saved: SavedFilterStore<S>,
    pagination: Pagination,
    sorting: Option<Sorting>,
    selection: Selection,
}

impl<S: FilterStorage> FilterableTable<S> {
    /// Creates a table with an empty query.
    pub fn new(
        records: Vec<Record>,
        properties: Vec<FilteringProperty>,
        saved: SavedFilterStore<S>,
    ) -> Self {
        Self {
            records,
            properties,
            date_property: DEFAULT_DATE_PROPERTY.to_string(),
            query: Query::default(),
            date_filter: None,
            saved,
            pagination: Pagination::default(),
            sorting: None,
            selection: Selection::default(),
        }
    }

    /// Sets the number of rows per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = Pagination::new(page_size);
        self
    }

    /// Sets the property compared by the exact-date filter.
    pub fn with_date_property(mut self, key: impl Into<String>) -> Self {
        self.date_property = key.into();
        self
    }

    /// Sets the row selection mode, clearing any selected rows.
    pub fn with_selection_type(mut self, selection_type: SelectionType) -> Self {
        self.selection = Selection::new(selection_type);
        self
    }

    // ==================== State ====================

    /// Returns all records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the filterable property declarations.
    pub fn properties(&self) -> &[FilteringProperty] {
        &self.properties
    }

    /// Returns the working query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the exact-date filter.
    pub fn date_filter(&self) -> Option<&str> {
        self.date_filter.as_deref()
    }

    /// Returns the property compared by the exact-date filter.
    pub fn date_property(&self) -> &str {
        &self.date_property
    }

    /// Returns true if the working query has tokens.
    pub fn is_filtering(&self) -> bool {
        !self.query.is_empty()
    }

    /// Returns the saved filter store.
    pub fn saved_filters(&self) -> &SavedFilterStore<S> {
        &self.saved
    }

    /// Returns the saved filter store for direct edits (rename, update).
    pub fn saved_filters_mut(&mut self) -> &mut SavedFilterStore<S> {
        &mut self.saved
    }

    // ==================== Working Query ====================

    /// Replaces the working query.
    pub fn set_query(&mut self, query: Query) {
        self.query = query;
        self.filter_changed();
    }

    /// Appends a token to the working query.
    pub fn add_token(&mut self, token: Token) {
        self.query.tokens.push(token);
        self.filter_changed();
    }

    /// Removes the token at `index`, returning it.
    pub fn remove_token(&mut self, index: usize) -> Option<Token> {
        if index >= self.query.tokens.len() {
            return None;
        }
        let token = self.query.tokens.remove(index);
        self.filter_changed();
        Some(token)
    }

    /// Sets how the working query's tokens are combined.
    pub fn set_operation(&mut self, operation: Operation) {
        self.query.operation = operation;
        self.filter_changed();
    }

    /// Sets or clears the exact-date filter. An empty string clears it.
    pub fn set_date_filter(&mut self, date: Option<String>) {
        self.date_filter = date.filter(|d| !d.is_empty());
        self.filter_changed();
    }

    // ==================== Views ====================

    /// Returns the records matching the date filter and working query, in
    /// the current sort order.
    pub fn filtered(&self) -> Vec<&Record> {
        let mut records = self.matched();
        if let Some(sorting) = &self.sorting {
            sorting.sort(&mut records);
        }
        records
    }

    /// Returns the number of filtered records.
    pub fn filtered_count(&self) -> usize {
        self.matched().len()
    }

    /// Returns the candidate values for every property among the filtered
    /// records.
    pub fn options(&self) -> Vec<FilteringOption> {
        derive_options(&self.matched(), &self.properties)
    }

    /// Returns the current page of filtered records.
    pub fn page(&self) -> Page<'_> {
        let filtered = self.filtered();
        let total = filtered.len();
        Page {
            records: self.pagination.page_slice(&filtered).to_vec(),
            current_page: self.pagination.clamped_page(total),
            pages_count: self.pagination.pages_count(total),
            total,
        }
    }

    /// Moves to `page` (1-based).
    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    /// Returns the pagination state.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Sets or clears the sort order.
    pub fn sort_by(&mut self, sorting: Option<Sorting>) {
        self.sorting = sorting;
    }

    /// Returns the sort order.
    pub fn sorting(&self) -> Option<&Sorting> {
        self.sorting.as_ref()
    }

    // ==================== Row Selection ====================

    /// Selects the row with `id`.
    pub fn select_row(&mut self, id: &str) {
        self.selection.select(id);
    }

    /// Deselects the row with `id`.
    pub fn deselect_row(&mut self, id: &str) {
        self.selection.deselect(id);
    }

    /// Returns the selected rows.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ==================== Filter Actions ====================

    /// Lists the filter actions offered for the current state.
    ///
    /// `save` is disabled while the working query is empty; `delete` is only
    /// listed while a saved filter is selected.
    pub fn available_actions(&self) -> Vec<FilterAction> {
        let mut actions = vec![
            FilterAction {
                kind: FilterActionKind::Clear,
                disabled: false,
            },
            FilterAction {
                kind: FilterActionKind::Save,
                disabled: !self.can_save(),
            },
        ];
        if self.saved.selected_id().is_some() {
            actions.push(FilterAction {
                kind: FilterActionKind::Delete,
                disabled: false,
            });
        }
        actions
    }

    /// Resets the working query to an empty AND query and clears the saved
    /// selection and date filter.
    pub fn clear(&mut self) {
        self.query = Query::default();
        self.date_filter = None;
        self.saved.clear_selection();
        self.filter_changed();
    }

    /// Returns true if the working query can be saved.
    pub fn can_save(&self) -> bool {
        !self.query.is_empty()
    }

    /// Saves a copy of the working query under `name`.
    ///
    /// Returns `None` if the query is empty or the name is blank.
    pub fn save_current(&mut self, name: &str) -> Option<SavedFilter> {
        if !self.can_save() {
            return None;
        }
        self.saved.save(name, &self.query)
    }

    /// Deletes the selected saved filter and resets the working query.
    ///
    /// Returns false if nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.saved.selected_id().map(str::to_string) else {
            return false;
        };
        self.saved.delete(&id);
        self.query = Query::default();
        self.filter_changed();
        true
    }

    /// Selects a saved filter and loads its query into the working query.
    ///
    /// `None` clears the selection and resets the working query. An id with
    /// no saved filter is still selected, but the working query is left as
    /// it was.
    pub fn apply_saved(&mut self, id: Option<&str>) {
        self.saved.select(id);
        match id {
            None => self.query = Query::default(),
            Some(id) => match self.saved.get(id) {
                Some(filter) => {
                    debug!(id, name = %filter.name, "applying saved filter");
                    self.query = filter.query.clone();
                }
                None => {
                    debug!(id, "selected saved filter does not exist");
                    return;
                }
            },
        }
        self.filter_changed();
    }

    fn matched(&self) -> Vec<&Record> {
        let context = FilterContext::new(&self.properties).with_date_property(&self.date_property);
        FilterEvaluator::new(&self.query, &context)
            .with_exact_date(self.date_filter.as_deref())
            .filter_records(&self.records)
    }

    fn filter_changed(&mut self) {
        self.pagination.set_page(1);
        let mut selection = std::mem::take(&mut self.selection);
        selection.retain_visible(&self.matched());
        self.selection = selection;
    }
}
