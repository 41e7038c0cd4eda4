//! Error types for panel construction.
//!
//! Only structural contract violations surface as errors: a price series
//! whose dates are not strictly increasing, or a frame handed to a
//! constructor without its required columns, indicates an upstream
//! data-acquisition bug and fails loudly at construction time. Ordinary
//! data-quality gaps (a missing line item, a horizon running past the end
//! of price history, an undersized peer group) are absorbed as missing
//! values and flow through the pipeline as `None`.

use thiserror::Error;

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, DupontError>;

/// Errors that can occur during panel construction.
#[derive(Debug, Error)]
pub enum DupontError {
    /// Price series dates are not strictly increasing
    #[error("price series dates must be strictly increasing (violation at index {position})")]
    NonMonotonicDates {
        /// Index of the first out-of-order observation
        position: usize,
    },

    /// Missing required column in input data
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A date value that could not be parsed as `%Y-%m-%d`
    #[error("unparseable date value: {0}")]
    InvalidDate(String),

    /// A null value in a column that must be fully populated
    #[error("null value in required column: {0}")]
    NullColumn(String),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
