//! Filtering, sorting and averaging of the menu table.
//!
//! A [`MenuFilter`] describes what the user currently wants to see. Applying
//! it to a [`Dataset`] yields the visible [`RowId`]s in display order; those
//! ids are what the display layer renders and what it later hands to
//! [`SelectionSet::set_visible`](crate::SelectionSet::set_visible).

use std::cmp::Ordering;

use crate::kana::{fold, to_hiragana};
use crate::menu::{Dataset, MenuRow, Nutrient, RowId};
use crate::selection::NutrientTotals;

/// A dietary goal that narrows the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Goal {
    /// No restriction.
    #[default]
    All,
    /// Fat at most [`Goal::WEIGHT_LOSS_MAX_FAT`] grams.
    WeightLoss,
    /// Protein at least [`Goal::BULK_MIN_PROTEIN`] grams and carbohydrate at
    /// least [`Goal::BULK_MIN_CARBS`] grams.
    Bulk,
}

impl Goal {
    /// Upper fat bound for [`Goal::WeightLoss`], in grams.
    pub const WEIGHT_LOSS_MAX_FAT: f64 = 20.0;
    /// Lower protein bound for [`Goal::Bulk`], in grams.
    pub const BULK_MIN_PROTEIN: f64 = 25.0;
    /// Lower carbohydrate bound for [`Goal::Bulk`], in grams.
    pub const BULK_MIN_CARBS: f64 = 60.0;

    /// Whether `row` satisfies the goal. A row missing a nutrient the goal
    /// looks at never does.
    pub fn accepts(self, row: &MenuRow) -> bool {
        match self {
            Goal::All => true,
            Goal::WeightLoss => row
                .nutrient(Nutrient::Fat)
                .is_some_and(|fat| fat <= Self::WEIGHT_LOSS_MAX_FAT),
            Goal::Bulk => {
                row.nutrient(Nutrient::Protein)
                    .is_some_and(|p| p >= Self::BULK_MIN_PROTEIN)
                    && row
                        .nutrient(Nutrient::Carbs)
                        .is_some_and(|c| c >= Self::BULK_MIN_CARBS)
            }
        }
    }
}

/// Sort direction for a nutrient column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// The current filter and sort settings of the menu table.
///
/// # Examples
///
/// ```
/// use menufinder::{Dataset, Goal, MenuFilter, MenuRow, Nutrient, SortOrder};
///
/// let data = Dataset::new(vec![
///     MenuRow::new("松屋", "牛めし", 20.5, 24.6, 95.2),
///     MenuRow::new("松屋", "サラダ", 1.2, 0.3, 4.1),
///     MenuRow::new("すき家", "牛丼", 22.9, 25.0, 104.1),
/// ]);
///
/// let filter = MenuFilter {
///     store: Some("松屋".to_owned()),
///     goal: Goal::WeightLoss,
///     ..Default::default()
/// };
/// let visible = filter.apply(&data);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(data.get(visible[0]).unwrap().item_name, "サラダ");
///
/// let filter = MenuFilter::default().sorted_by(Nutrient::Protein, SortOrder::Descending);
/// let first = data.get(filter.apply(&data)[0]).unwrap();
/// assert_eq!(first.item_name, "牛丼");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFilter {
    /// Only rows of this store (exact name).
    pub store: Option<String>,
    /// Only rows of this category (exact match).
    pub category: Option<String>,
    /// Only rows whose item name contains this text, ignoring case, width
    /// and kana script.
    pub keyword: Option<String>,
    /// Dietary goal.
    pub goal: Goal,
    /// Nutrient column and direction to sort by; load order when `None`.
    pub sort: Option<(Nutrient, SortOrder)>,
}

/// Normalize text for keyword comparison.
fn keyword_form(s: &str) -> String {
    to_hiragana(&fold(s))
}

impl MenuFilter {
    /// Return this filter sorted by `nutrient` in `order`.
    #[must_use]
    pub fn sorted_by(mut self, nutrient: Nutrient, order: SortOrder) -> Self {
        self.sort = Some((nutrient, order));
        self
    }

    /// The ids of the rows this filter shows, in display order.
    pub fn apply(&self, dataset: &Dataset) -> Vec<RowId> {
        let keyword = self
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(keyword_form);

        let mut visible: Vec<(RowId, &MenuRow)> = dataset
            .iter()
            .filter(|(_, row)| {
                self.store.as_deref().is_none_or(|s| row.store_name == s)
                    && self
                        .category
                        .as_deref()
                        .is_none_or(|c| row.category.as_deref() == Some(c))
                    && keyword
                        .as_deref()
                        .is_none_or(|k| keyword_form(&row.item_name).contains(k))
                    && self.goal.accepts(row)
            })
            .collect();

        if let Some((nutrient, order)) = self.sort {
            // Stable, so equal values keep load order.
            visible.sort_by(|(_, a), (_, b)| {
                compare_nutrient(a.nutrient(nutrient), b.nutrient(nutrient), order)
            });
        }

        visible.into_iter().map(|(id, _)| id).collect()
    }
}

/// Order two optional values, with missing values last in either direction.
fn compare_nutrient(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Distinct non-empty categories in first-appearance order, optionally for
/// one store only.
pub fn categories<'d>(dataset: &'d Dataset, store: Option<&str>) -> Vec<&'d str> {
    let mut seen = std::collections::HashSet::new();
    dataset
        .iter()
        .filter(|(_, row)| store.is_none_or(|s| row.store_name == s))
        .filter_map(|(_, row)| row.category.as_deref())
        .filter(|c| !c.trim().is_empty() && seen.insert(*c))
        .collect()
}

/// Per-nutrient mean over `rows`, skipping missing values.
///
/// Returns `None` for an empty row sequence. A nutrient missing from every
/// row averages to 0.
///
/// # Examples
///
/// ```
/// use menufinder::{MenuRow, average};
///
/// let mut partial = MenuRow::new("s", "b", 30.0, 0.0, 0.0);
/// partial.protein_grams = None;
/// let rows = [MenuRow::new("s", "a", 10.0, 4.0, 8.0), partial];
///
/// let avg = average(&rows).unwrap();
/// assert_eq!(avg.protein, 10.0);
/// assert_eq!(avg.fat, 2.0);
/// let none: [MenuRow; 0] = [];
/// assert!(average(&none).is_none());
/// ```
pub fn average<'r, I>(rows: I) -> Option<NutrientTotals>
where
    I: IntoIterator<Item = &'r MenuRow>,
{
    let mut sums = [0.0f64; 4];
    let mut counts = [0usize; 4];
    let mut rows_seen = 0usize;

    for row in rows {
        rows_seen += 1;
        for (slot, nutrient) in Nutrient::ALL.into_iter().enumerate() {
            if let Some(value) = row.nutrient(nutrient) {
                sums[slot] += value;
                counts[slot] += 1;
            }
        }
    }

    if rows_seen == 0 {
        return None;
    }

    let mean = |slot: usize| {
        if counts[slot] == 0 {
            0.0
        } else {
            sums[slot] / counts[slot] as f64
        }
    };
    Some(NutrientTotals {
        calories: mean(0),
        protein: mean(1),
        fat: mean(2),
        carbs: mean(3),
    })
}
