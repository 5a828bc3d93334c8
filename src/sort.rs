//! Sorting logic for ordering matched store names by rank and tie-breaking criteria.
//!
//! Provides the default two-level comparator used by the matcher: rank
//! (best first), then a pluggable tiebreaker.

use std::cmp::Ordering;

use crate::ranking::Ranking;

/// A store name paired with the ranking it earned for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedName<'a> {
    /// The store name as it appears in the index.
    pub name: &'a str,
    /// Position of the name in the index's insertion order.
    pub index: usize,
    /// How well the name matched.
    pub rank: Ranking,
}

/// Alphabetical tiebreaker for ranked names.
///
/// Compares by code point order of the store names. Since indexed names are
/// distinct this yields a total order, which keeps matcher output stable
/// across calls.
///
/// # Examples
///
/// ```
/// use menufinder::{RankedName, Ranking, default_base_sort};
/// use std::cmp::Ordering;
///
/// let a = RankedName { name: "すき家", index: 0, rank: Ranking::Fuzzy(0.6) };
/// let b = RankedName { name: "松屋", index: 1, rank: Ranking::Fuzzy(0.6) };
/// assert_eq!(default_base_sort(&a, &b), Ordering::Less);
/// ```
pub fn default_base_sort(a: &RankedName<'_>, b: &RankedName<'_>) -> Ordering {
    a.name.cmp(b.name)
}

/// Two-level comparator for sorting ranked names.
///
/// 1. **Better rank wins**: exact matches first, then literal hits by
///    ascending position and descending similarity, then fuzzy hits by
///    descending similarity.
/// 2. **Base sort tiebreaker**: when ranks are equal, `base_sort` decides
///    (default: alphabetical by name).
///
/// # Examples
///
/// ```
/// use menufinder::{RankedName, Ranking, default_base_sort, sort_ranked_names};
/// use std::cmp::Ordering;
///
/// let a = RankedName { name: "b", index: 0, rank: Ranking::Literal { position: 0, similarity: 0.2 } };
/// let b = RankedName { name: "a", index: 1, rank: Ranking::Literal { position: 2, similarity: 0.9 } };
///
/// // Position 0 beats position 2, so `a` comes first.
/// assert_eq!(sort_ranked_names(&a, &b, &default_base_sort), Ordering::Less);
/// ```
pub fn sort_ranked_names<'a>(
    a: &RankedName<'a>,
    b: &RankedName<'a>,
    base_sort: &dyn Fn(&RankedName<'a>, &RankedName<'a>) -> Ordering,
) -> Ordering {
    // Better rank first (descending). NaN similarities compare as equal.
    b.rank
        .partial_cmp(&a.rank)
        .unwrap_or(Ordering::Equal)
        .then_with(|| base_sort(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ranked(name: &'static str, rank: Ranking) -> RankedName<'static> {
        RankedName {
            name,
            index: 0,
            rank,
        }
    }

    fn literal(position: usize, similarity: f64) -> Ranking {
        Ranking::Literal {
            position,
            similarity,
        }
    }

    // --- default_base_sort tests ---

    #[test]
    fn base_sort_alphabetical() {
        let a = make_ranked("apple", Ranking::Equal);
        let b = make_ranked("banana", Ranking::Equal);
        assert_eq!(default_base_sort(&a, &b), Ordering::Less);
        assert_eq!(default_base_sort(&b, &a), Ordering::Greater);
        assert_eq!(default_base_sort(&a, &a), Ordering::Equal);
    }

    // --- sort_ranked_names tests ---

    #[test]
    fn exact_before_literal() {
        let a = make_ranked("z", Ranking::CaseSensitiveEqual);
        let b = make_ranked("a", literal(0, 1.0));
        assert_eq!(sort_ranked_names(&a, &b, &default_base_sort), Ordering::Less);
    }

    #[test]
    fn literal_before_fuzzy() {
        let a = make_ranked("z", literal(7, 0.0));
        let b = make_ranked("a", Ranking::Fuzzy(0.99));
        assert_eq!(sort_ranked_names(&a, &b, &default_base_sort), Ordering::Less);
    }

    #[test]
    fn literal_similarity_breaks_position_tie() {
        let a = make_ranked("z", literal(1, 0.8));
        let b = make_ranked("a", literal(1, 0.3));
        assert_eq!(sort_ranked_names(&a, &b, &default_base_sort), Ordering::Less);
    }

    #[test]
    fn base_sort_reached_only_on_equal_rank() {
        let panic_sort = |_a: &RankedName<'_>, _b: &RankedName<'_>| -> Ordering {
            panic!("base_sort should not be called when ranks differ");
        };
        let a = make_ranked("a", Ranking::Fuzzy(0.9));
        let b = make_ranked("b", Ranking::Fuzzy(0.6));
        assert_eq!(sort_ranked_names(&a, &b, &panic_sort), Ordering::Less);
    }

    #[test]
    fn custom_base_sort_by_index() {
        let index_sort = |a: &RankedName<'_>, b: &RankedName<'_>| a.index.cmp(&b.index);
        let mut a = make_ranked("a", Ranking::Equal);
        a.index = 4;
        let mut b = make_ranked("b", Ranking::Equal);
        b.index = 1;
        assert_eq!(sort_ranked_names(&a, &b, &index_sort), Ordering::Greater);
    }

    #[test]
    fn sort_by_produces_correct_order() {
        let mut ranked = vec![
            make_ranked("fuzzy", Ranking::Fuzzy(0.7)),
            make_ranked("late", literal(3, 0.9)),
            make_ranked("exact", Ranking::CaseSensitiveEqual),
            make_ranked("early-b", literal(0, 0.4)),
            make_ranked("early-a", literal(0, 0.4)),
            make_ranked("folded", Ranking::Equal),
        ];
        ranked.sort_by(|a, b| sort_ranked_names(a, b, &default_base_sort));

        let names: Vec<&str> = ranked.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["exact", "folded", "early-a", "early-b", "late", "fuzzy"]
        );
    }
}
