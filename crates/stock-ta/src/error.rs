//! Error types for stock-ta.
//!
//! This module defines the error type returned by every fallible operation in
//! the library. Undefined numeric results (insufficient history, zero ranges,
//! `0/0`) are never errors: they are reported in-band as NaN.

use thiserror::Error;

use crate::series::Column;

/// The main error type for stock-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The window, span or period parameter is invalid.
    ///
    /// Returned when a window-based operation is asked for a window of zero.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A non-period parameter is outside its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of why the value is rejected.
        reason: &'static str,
    },

    /// An indicator needs a price column the series does not carry.
    #[error("{indicator} requires the {column} column, which the price series does not have")]
    MissingColumn {
        /// The absent column.
        column: Column,
        /// The indicator that asked for it.
        indicator: &'static str,
    },

    /// Input columns do not have the same number of rows.
    #[error("length mismatch in {column} column: expected {expected} rows, got {actual}")]
    LengthMismatch {
        /// The column whose length is wrong.
        column: Column,
        /// The expected number of rows.
        expected: usize,
        /// The number of rows provided.
        actual: usize,
    },

    /// Timestamps are not strictly increasing.
    #[error("timestamps must be strictly increasing (violated at position {position})")]
    UnorderedTimestamps {
        /// Position of the first timestamp that is not greater than its predecessor.
        position: usize,
    },

    /// An indicator name was not recognised.
    #[error("unknown indicator `{name}`")]
    UnknownIndicator {
        /// The name that failed to resolve.
        name: String,
    },

    /// An indicator request could not be parsed.
    #[error("malformed indicator request `{request}`: {reason}")]
    MalformedRequest {
        /// The raw request text.
        request: String,
        /// Description of the problem.
        reason: &'static str,
    },

    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert values
    /// (e.g., converting a `usize` window to a generic `Float` type) and
    /// the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the stock-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;
