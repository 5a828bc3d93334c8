#![warn(missing_docs)]

//! Kana-aware store-name search and meal selection over chain-restaurant
//! nutrition data.
//!
//! `menufinder` has two halves. The matcher ranks store names against a
//! query typed in hiragana, katakana, half-width kana or romaji, falling back
//! to edit-distance similarity when nothing matches literally. The selection
//! side tracks which menu rows a user ticked across filtered views and sums
//! their protein, fat and carbohydrate.
//!
//! ```
//! use menufinder::{Dataset, MatcherOptions, MenuRow, match_store_names};
//!
//! let data = Dataset::new(vec![
//!     MenuRow::new("マクドナルド", "ビッグマック", 26.0, 28.3, 41.8),
//!     MenuRow::new("モスバーガー", "モスバーガー", 15.9, 17.3, 41.8),
//! ]);
//! let index = data.name_index();
//! let opts = MatcherOptions::default();
//!
//! assert_eq!(match_store_names(&index, "もす", &opts), ["モスバーガー"]);
//! assert_eq!(match_store_names(&index, "makudo", &opts), ["マクドナルド"]);
//! ```

/// Error type shared by the crate.
pub mod error;

/// Kana conversion, width folding and Hepburn romanization.
pub mod kana;

/// Configuration options for store-name matching.
pub mod options;

/// Ranking algorithm for scoring how well a store name matches a query.
pub mod ranking;

/// Precomputed search forms of store names.
pub mod index;

/// Sorting of ranked store names.
pub mod sort;

/// Store-name matching entry points.
pub mod matcher;

/// Menu rows, nutrient columns and the loaded dataset.
pub mod menu;

/// Selection tracking and nutrient aggregation.
pub mod selection;

/// Menu filtering, sorting and averages.
pub mod view;

/// Per-user interaction state.
pub mod session;

// Re-export primary public API types and functions at the crate root.
pub use error::{Error, Result};
pub use index::{NameEntry, NameIndex};
pub use matcher::{match_store_names, rank_store_names};
pub use menu::{Dataset, MenuRow, Nutrient, RowId};
pub use options::{EmptyQueryPolicy, MatcherOptions};
pub use ranking::{Ranking, get_match_ranking};
pub use selection::{NutrientTotals, SelectionSet, aggregate};
pub use session::Session;
pub use sort::{RankedName, default_base_sort, sort_ranked_names};
pub use view::{Goal, MenuFilter, SortOrder, average, categories};
