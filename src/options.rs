//! Configuration options for store-name matching.
//!
//! [`MatcherOptions`] controls the result cap, the fuzzy fallback and the
//! empty-query policy. It deserializes with serde so a host application can
//! embed it in its own configuration file; every field has a default.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default cap on the number of names returned by the matcher.
pub const DEFAULT_LIMIT: usize = 10;

/// Default minimum similarity for a fuzzy-only match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.5;

/// What the matcher returns for an empty (or whitespace-only) query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQueryPolicy {
    /// Return nothing until the user has typed something.
    #[default]
    NoResults,
    /// Return every indexed name in index order, capped at the limit.
    All,
}

/// Options that control store-name matching.
///
/// # Defaults
///
/// - `limit`: [`DEFAULT_LIMIT`] (10)
/// - `fuzzy`: `true`
/// - `fuzzy_threshold`: [`DEFAULT_FUZZY_THRESHOLD`] (0.5)
/// - `empty_query`: [`EmptyQueryPolicy::NoResults`]
///
/// # Examples
///
/// ```
/// use menufinder::{EmptyQueryPolicy, MatcherOptions};
///
/// let opts = MatcherOptions::default();
/// assert_eq!(opts.limit, 10);
///
/// let opts = MatcherOptions { empty_query: EmptyQueryPolicy::All, ..Default::default() };
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatcherOptions {
    /// Maximum number of names returned.
    pub limit: usize,

    /// When `true`, candidates without a literal hit may still match if they
    /// are similar enough to the query.
    pub fuzzy: bool,

    /// Minimum similarity ratio in `0.0..=1.0` for a fuzzy-only match.
    pub fuzzy_threshold: f64,

    /// Behavior for an empty query.
    pub empty_query: EmptyQueryPolicy,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            fuzzy: true,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            empty_query: EmptyQueryPolicy::NoResults,
        }
    }
}

impl MatcherOptions {
    /// Check that the options describe a usable matcher.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroLimit`] if `limit` is 0.
    /// - [`Error::InvalidThreshold`] if `fuzzy_threshold` is NaN or outside
    ///   `0.0..=1.0`.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::ZeroLimit);
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(Error::InvalidThreshold(self.fuzzy_threshold));
        }
        Ok(())
    }
}
