//! Ranking tiers and scoring logic for store-name matching.
//!
//! This module classifies how well one indexed store name matches a query,
//! from exact equality down to an approximate similarity match. A query is
//! compared in three forms (as typed, hiragana, romaji) against the four
//! precomputed forms of a [`NameEntry`], so a hiragana query finds a katakana
//! name and a romaji query finds either.

use std::cmp::Ordering;

use memchr::memmem::Finder;

use crate::index::NameEntry;
use crate::kana::{fold, romanize, to_hiragana};
use crate::options::MatcherOptions;

/// Represents the quality of a match between a store name and a query.
///
/// Ordered from best to worst:
///
/// | Tier                 | Description                                            |
/// |----------------------|--------------------------------------------------------|
/// | `CaseSensitiveEqual` | The name is exactly the (trimmed) query                |
/// | `Equal`              | The name equals the query after folding                |
/// | `Literal`            | A query form is a substring of a name form             |
/// | `Fuzzy(f64)`         | No substring hit, but similarity meets the threshold   |
/// | `NoMatch`            | No match found                                         |
///
/// # Ordering
///
/// `Ranking` implements [`PartialOrd`] such that better matches compare as
/// greater. Two `Literal` rankings compare by position first (an earlier
/// position is better) and then by similarity (higher is better). Two
/// `Fuzzy` rankings compare by similarity. Any `Literal` outranks any
/// `Fuzzy`.
#[derive(Debug, Clone, Copy)]
pub enum Ranking {
    /// The store name is byte-for-byte the trimmed query.
    CaseSensitiveEqual,
    /// The store name equals the query after NFKC folding and lowercasing.
    Equal,
    /// A literal substring hit.
    Literal {
        /// Character offset of the earliest hit within the matched form.
        position: usize,
        /// Best similarity ratio between corresponding forms, in `0.0..=1.0`.
        similarity: f64,
    },
    /// Approximate match carrying its similarity ratio in `0.0..=1.0`.
    Fuzzy(f64),
    /// No match found.
    NoMatch,
}

impl Ranking {
    fn tier_value(&self) -> u8 {
        match self {
            Ranking::CaseSensitiveEqual => 4,
            Ranking::Equal => 3,
            Ranking::Literal { .. } => 2,
            Ranking::Fuzzy(_) => 1,
            Ranking::NoMatch => 0,
        }
    }

    /// Whether this ranking represents any kind of match.
    pub fn is_match(&self) -> bool {
        !matches!(self, Ranking::NoMatch)
    }
}

impl PartialEq for Ranking {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Ranking {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (
                Ranking::Literal {
                    position: pa,
                    similarity: sa,
                },
                Ranking::Literal {
                    position: pb,
                    similarity: sb,
                },
            ) => match pb.cmp(pa) {
                // Earlier position is better, so the comparison is reversed.
                Ordering::Equal => sa.partial_cmp(sb),
                ord => Some(ord),
            },
            (Ranking::Fuzzy(a), Ranking::Fuzzy(b)) => a.partial_cmp(b),
            _ => self.tier_value().partial_cmp(&other.tier_value()),
        }
    }
}

/// Similarity ratio between two strings in `0.0..=1.0`.
///
/// Uses the normalized Levenshtein distance over Unicode scalar values, so
/// one kana counts as one character.
///
/// # Examples
///
/// ```
/// use menufinder::ranking::similarity;
///
/// assert_eq!(similarity("makudonarudo", "makudonarudo"), 1.0);
/// assert!(similarity("makudonaldo", "makudonarudo") > 0.8);
/// assert!(similarity("mc", "makudonarudo") < 0.2);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Character position of a byte offset within `s`.
fn char_position(s: &str, byte_offset: usize) -> usize {
    if s.is_ascii() {
        byte_offset
    } else {
        s[..byte_offset].chars().count()
    }
}

/// Pre-computed query data for amortizing repeated per-entry ranking calls.
///
/// Holds the trimmed query, its folded, hiragana and romaji forms, and one
/// substring searcher per distinct non-empty form.
pub(crate) struct PreparedQuery {
    /// The query with surrounding whitespace removed.
    trimmed: String,
    folded: String,
    hiragana: String,
    romaji: String,
    /// Searchers for each distinct form, built once per query.
    finders: Vec<Finder<'static>>,
}

impl PreparedQuery {
    pub(crate) fn new(query: &str) -> Self {
        let trimmed = query.trim().to_owned();
        let folded = fold(&trimmed).into_owned();
        let hiragana = to_hiragana(&folded);
        let romaji = romanize(&folded);

        let mut finders: Vec<Finder<'static>> = Vec::with_capacity(3);
        for form in [&folded, &hiragana, &romaji] {
            if form.is_empty() || finders.iter().any(|f| f.needle() == form.as_bytes()) {
                continue;
            }
            finders.push(Finder::new(form.as_bytes()).into_owned());
        }

        Self {
            trimmed,
            folded,
            hiragana,
            romaji,
            finders,
        }
    }

    /// Whether the query has nothing left after trimming.
    pub(crate) fn is_empty(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// Earliest character position of any query form inside any entry form.
    fn earliest_hit(&self, entry: &NameEntry) -> Option<usize> {
        let mut best: Option<usize> = None;
        for form in entry.forms() {
            for finder in &self.finders {
                if let Some(offset) = finder.find(form.as_bytes()) {
                    let pos = char_position(form, offset);
                    best = Some(best.map_or(pos, |b| b.min(pos)));
                    if pos == 0 {
                        return best;
                    }
                }
            }
        }
        best
    }

    /// Best similarity across corresponding query and entry forms.
    fn best_similarity(&self, entry: &NameEntry) -> f64 {
        similarity(&self.folded, entry.folded())
            .max(similarity(&self.hiragana, entry.reading()))
            .max(similarity(&self.romaji, entry.romaji()))
    }
}

/// Inner ranking function using pre-prepared query data.
pub(crate) fn get_match_ranking_prepared(
    entry: &NameEntry,
    pq: &PreparedQuery,
    options: &MatcherOptions,
) -> Ranking {
    if pq.is_empty() {
        return Ranking::NoMatch;
    }

    // Names keep their dataset spelling, surrounding whitespace included.
    if entry.name().trim() == pq.trimmed {
        return Ranking::CaseSensitiveEqual;
    }
    if entry.folded().trim() == pq.folded {
        return Ranking::Equal;
    }

    if let Some(position) = pq.earliest_hit(entry) {
        return Ranking::Literal {
            position,
            similarity: pq.best_similarity(entry),
        };
    }

    if !options.fuzzy {
        return Ranking::NoMatch;
    }

    let score = pq.best_similarity(entry);
    if score >= options.fuzzy_threshold {
        Ranking::Fuzzy(score)
    } else {
        Ranking::NoMatch
    }
}

/// Determine how well an indexed store name matches a query.
///
/// The query is trimmed; an empty query never matches (the empty-query
/// policy is applied by [`match_store_names`](crate::match_store_names),
/// not here).
///
/// # Arguments
///
/// * `entry` - The indexed store name being evaluated
/// * `query` - The user's query in any script
/// * `options` - Controls the fuzzy fallback and its threshold
///
/// # Examples
///
/// ```
/// use menufinder::{MatcherOptions, NameEntry, Ranking, get_match_ranking};
///
/// let opts = MatcherOptions::default();
/// let entry = NameEntry::new("マクドナルド");
///
/// assert_eq!(get_match_ranking(&entry, "マクドナルド", &opts), Ranking::CaseSensitiveEqual);
/// assert!(matches!(
///     get_match_ranking(&entry, "まく", &opts),
///     Ranking::Literal { position: 0, .. }
/// ));
/// assert_eq!(get_match_ranking(&entry, "mc", &opts), Ranking::NoMatch);
/// ```
pub fn get_match_ranking(entry: &NameEntry, query: &str, options: &MatcherOptions) -> Ranking {
    let pq = PreparedQuery::new(query);
    get_match_ranking_prepared(entry, &pq, options)
}
