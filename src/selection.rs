//! Selection tracking across changing views, and nutrient aggregation.
//!
//! The display layer renders some subset of the dataset and lets the user
//! tick rows in it. A [`SelectionSet`] remembers every ticked [`RowId`] for
//! the whole session. Each time a view is rendered, the selection is updated
//! with [`SelectionSet::set_visible`]:
//!
//! ```text
//! selection := (selection \ visible) ∪ checked
//! ```
//!
//! so unticking a visible row drops it, while rows hidden by the current
//! filter keep whatever state they had.

use std::collections::BTreeSet;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::menu::{Dataset, MenuRow, Nutrient, RowId};

/// Session-scoped set of selected rows.
///
/// Ids are kept ordered so iteration follows load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RowId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the selection with one rendered view.
    ///
    /// Ids in `visible` that are not in `checked` are removed, ids in
    /// `checked` are inserted, and every other id is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use menufinder::{Dataset, MenuRow, SelectionSet};
    ///
    /// let data = Dataset::new(vec![
    ///     MenuRow::new("s", "a", 10.0, 0.0, 0.0),
    ///     MenuRow::new("s", "b", 20.0, 0.0, 0.0),
    ///     MenuRow::new("s", "c", 5.0, 0.0, 0.0),
    /// ]);
    /// let ids: Vec<_> = data.ids().collect();
    ///
    /// let mut selection = SelectionSet::new();
    /// selection.set_visible(ids.iter().copied(), [ids[0], ids[2]]);
    ///
    /// // Filter down to b and c; c stays ticked, a is hidden.
    /// selection.set_visible([ids[1], ids[2]], [ids[2]]);
    /// assert!(selection.contains(ids[0]));
    /// assert!(selection.contains(ids[2]));
    /// assert!(!selection.contains(ids[1]));
    /// ```
    pub fn set_visible<V, C>(&mut self, visible: V, checked: C)
    where
        V: IntoIterator<Item = RowId>,
        C: IntoIterator<Item = RowId>,
    {
        let before = self.ids.len();
        let mut cleared = 0usize;
        for id in visible {
            if self.ids.remove(&id) {
                cleared += 1;
            }
        }
        let mut checked_count = 0usize;
        for id in checked {
            self.ids.insert(id);
            checked_count += 1;
        }
        tracing::debug!(
            before,
            cleared,
            checked = checked_count,
            after = self.ids.len(),
            "reconciled selection with view"
        );
    }

    /// Mark a row as selected. Returns `true` if it was not already.
    pub fn check(&mut self, id: RowId) -> bool {
        self.ids.insert(id)
    }

    /// Unmark a row. Returns `true` if it was selected.
    pub fn uncheck(&mut self, id: RowId) -> bool {
        self.ids.remove(&id)
    }

    /// Whether a row is selected.
    pub fn contains(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }

    /// The selected ids among `visible`: the checked state a view should render.
    pub fn checked_among<V>(&self, visible: V) -> BTreeSet<RowId>
    where
        V: IntoIterator<Item = RowId>,
    {
        visible.into_iter().filter(|id| self.ids.contains(id)).collect()
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RowId> + '_ {
        self.ids.iter().copied()
    }

    /// Every selected row, in dataset order, regardless of the current view.
    ///
    /// Ids that do not belong to `dataset` are skipped.
    pub fn selected_rows<'d>(&self, dataset: &'d Dataset) -> Vec<&'d MenuRow> {
        self.ids.iter().filter_map(|&id| dataset.get(id)).collect()
    }
}

impl FromIterator<RowId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Summed calories and macronutrients of a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutrientTotals {
    /// Energy in kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein: f64,
    /// Fat in grams.
    pub fat: f64,
    /// Carbohydrate in grams.
    pub carbs: f64,
}

impl NutrientTotals {
    /// Totals of a single row, with missing values counted as 0.
    pub fn of_row(row: &MenuRow) -> Self {
        let value = |n| row.nutrient(n).unwrap_or(0.0);
        Self {
            calories: value(Nutrient::Calories),
            protein: value(Nutrient::Protein),
            fat: value(Nutrient::Fat),
            carbs: value(Nutrient::Carbs),
        }
    }

    /// The total for one nutrient.
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
        }
    }
}

impl Add for NutrientTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
        }
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Sum the nutrients of `rows`.
///
/// Missing and non-finite values count as 0, so one malformed row never
/// spoils the total.
///
/// # Examples
///
/// ```
/// use menufinder::{MenuRow, aggregate};
///
/// let mut broken = MenuRow::new("s", "b", 20.0, 1.0, 2.0);
/// broken.fat_grams = None;
/// let rows = [MenuRow::new("s", "a", 10.0, 5.0, 30.0), broken];
///
/// let totals = aggregate(&rows);
/// assert_eq!(totals.protein, 30.0);
/// assert_eq!(totals.fat, 5.0);
/// ```
pub fn aggregate<'r, I>(rows: I) -> NutrientTotals
where
    I: IntoIterator<Item = &'r MenuRow>,
{
    rows.into_iter().map(NutrientTotals::of_row).sum()
}
