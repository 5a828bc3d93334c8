//! Store-name matching over a prebuilt [`NameIndex`].
//!
//! [`match_store_names`] is the entry point the display layer calls on every
//! keystroke. It ranks every indexed name against the query, drops the
//! non-matches, sorts the rest and caps the result at the configured limit.

use crate::index::NameIndex;
use crate::options::{EmptyQueryPolicy, MatcherOptions};
use crate::ranking::{PreparedQuery, Ranking, get_match_ranking_prepared};
use crate::sort::{RankedName, default_base_sort, sort_ranked_names};

/// Rank the indexed store names against `query`, best first.
///
/// Each returned [`RankedName`] carries the ranking it earned. For an empty
/// query under [`EmptyQueryPolicy::All`], names are returned in index order
/// with [`Ranking::NoMatch`], since nothing was compared.
///
/// The output never exceeds `options.limit` entries and never repeats a
/// name.
///
/// # Examples
///
/// ```
/// use menufinder::{MatcherOptions, NameIndex, rank_store_names};
///
/// let index = NameIndex::from_names(["モスバーガー", "マクドナルド"]);
/// let ranked = rank_store_names(&index, "まく", &MatcherOptions::default());
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].name, "マクドナルド");
/// ```
pub fn rank_store_names<'a>(
    index: &'a NameIndex,
    query: &str,
    options: &MatcherOptions,
) -> Vec<RankedName<'a>> {
    let pq = PreparedQuery::new(query);

    if pq.is_empty() {
        return match options.empty_query {
            EmptyQueryPolicy::NoResults => Vec::new(),
            EmptyQueryPolicy::All => index
                .entries()
                .iter()
                .take(options.limit)
                .enumerate()
                .map(|(i, entry)| RankedName {
                    name: entry.name(),
                    index: i,
                    rank: Ranking::NoMatch,
                })
                .collect(),
        };
    }

    let mut ranked: Vec<RankedName<'a>> = index
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let rank = get_match_ranking_prepared(entry, &pq, options);
            rank.is_match().then_some(RankedName {
                name: entry.name(),
                index: i,
                rank,
            })
        })
        .collect();

    let hits = ranked.len();
    ranked.sort_by(|a, b| sort_ranked_names(a, b, &default_base_sort));
    ranked.truncate(options.limit);

    tracing::trace!(query, hits, returned = ranked.len(), "ranked store names");
    ranked
}

/// Return the store names matching `query`, best first.
///
/// This is [`rank_store_names`] without the rankings. An empty result means
/// nothing matched; callers display a "not found" state.
///
/// # Examples
///
/// ```
/// use menufinder::{MatcherOptions, NameIndex, match_store_names};
///
/// let mut index = NameIndex::from_names(["マクドナルド", "モスバーガー"]);
/// index.insert_with_reading("吉野家", "よしのや");
/// let opts = MatcherOptions::default();
///
/// assert_eq!(match_store_names(&index, "まく", &opts), ["マクドナルド"]);
/// assert_eq!(match_store_names(&index, "yoshi", &opts), ["吉野家"]);
/// assert!(match_store_names(&index, "mc", &opts).is_empty());
/// ```
pub fn match_store_names<'a>(
    index: &'a NameIndex,
    query: &str,
    options: &MatcherOptions,
) -> Vec<&'a str> {
    rank_store_names(index, query, options)
        .into_iter()
        .map(|r| r.name)
        .collect()
}
