//! Error type for the fallible parts of the crate.
//!
//! Matching and selection never fail. Errors only arise when validating
//! configuration or parsing user-facing names such as nutrient columns.

/// Errors produced by option validation and name parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The fuzzy similarity threshold was NaN or outside `0.0..=1.0`.
    #[error("fuzzy threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    /// The result limit was zero, which would suppress every match.
    #[error("result limit must be at least 1")]
    ZeroLimit,

    /// A nutrient column name did not match any known nutrient.
    #[error("unknown nutrient column `{0}`")]
    UnknownNutrient(String),
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
