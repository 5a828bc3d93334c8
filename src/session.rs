//! Per-user interaction state.
//!
//! A [`Session`] holds everything that changes while one user browses: the
//! store query they are typing, the store they picked, the menu filter and
//! the rows they ticked. The display layer owns one per user and passes it
//! to each interaction; nothing here is global.

use crate::index::NameIndex;
use crate::matcher::match_store_names;
use crate::menu::{Dataset, MenuRow, RowId};
use crate::options::MatcherOptions;
use crate::selection::{NutrientTotals, SelectionSet, aggregate};
use crate::view::MenuFilter;

/// State of one browsing session.
///
/// Changing the query, the store or the filter never touches the selection;
/// only [`record_checks`](Session::record_checks) and direct edits through
/// [`selection_mut`](Session::selection_mut) do.
///
/// # Examples
///
/// ```
/// use menufinder::{Dataset, MatcherOptions, MenuRow, Session};
///
/// let data = Dataset::new(vec![
///     MenuRow::new("マクドナルド", "ビッグマック", 26.0, 28.3, 41.8),
///     MenuRow::new("マクドナルド", "ポテトM", 4.8, 16.9, 48.8),
///     MenuRow::new("すき家", "牛丼並盛", 22.9, 25.0, 104.1),
/// ]);
/// let index = data.name_index();
///
/// let mut session = Session::new();
/// session.set_query("まく");
/// let candidates = session.store_candidates(&index, &MatcherOptions::default());
/// assert_eq!(candidates, ["マクドナルド"]);
///
/// session.select_store(Some(candidates[0]));
/// let visible = session.visible_rows(&data);
/// session.record_checks(&visible, [visible[0]]);
///
/// assert_eq!(session.totals(&data).protein, 26.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    query: String,
    filter: MenuFilter,
    selection: SelectionSet,
}

impl Session {
    /// Start a session with an empty query, no store and no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The current store query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Store names matching the current query.
    pub fn store_candidates<'i>(
        &self,
        index: &'i NameIndex,
        options: &MatcherOptions,
    ) -> Vec<&'i str> {
        match_store_names(index, &self.query, options)
    }

    /// Pick a store, or clear the pick with `None`.
    pub fn select_store(&mut self, store: Option<&str>) {
        self.filter.store = store.map(str::to_owned);
    }

    /// The picked store, if any.
    pub fn store(&self) -> Option<&str> {
        self.filter.store.as_deref()
    }

    /// The current menu filter.
    pub fn filter(&self) -> &MenuFilter {
        &self.filter
    }

    /// Mutable access to the menu filter.
    pub fn filter_mut(&mut self) -> &mut MenuFilter {
        &mut self.filter
    }

    /// Rows the current filter shows, in display order.
    ///
    /// Nothing is shown until a store has been picked.
    pub fn visible_rows(&self, dataset: &Dataset) -> Vec<RowId> {
        if self.filter.store.is_none() {
            return Vec::new();
        }
        self.filter.apply(dataset)
    }

    /// Record which of the rendered rows are ticked.
    pub fn record_checks<C>(&mut self, visible: &[RowId], checked: C)
    where
        C: IntoIterator<Item = RowId>,
    {
        self.selection.set_visible(visible.iter().copied(), checked);
    }

    /// The selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Mutable access to the selection.
    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// Every selected row, across all stores and filters.
    pub fn selected_rows<'d>(&self, dataset: &'d Dataset) -> Vec<&'d MenuRow> {
        self.selection.selected_rows(dataset)
    }

    /// Nutrient totals of the selected rows.
    pub fn totals(&self, dataset: &Dataset) -> NutrientTotals {
        aggregate(self.selection.selected_rows(dataset))
    }
}
