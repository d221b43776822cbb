//! Core traits for stock-ta numeric operations.
//!
//! The primary trait is [`SeriesElement`], which abstracts over `f32` and `f64`
//! so that every indicator works on either precision. The module also provides
//! the small set of validation helpers shared by the indicators.
//!
//! # Example
//!
//! ```
//! use stock_ta::traits::{validate_period, SeriesElement};
//!
//! fn mean_of_head<T: SeriesElement>(data: &[T], window: usize) -> stock_ta::Result<T> {
//!     validate_period(window, "window")?;
//!
//!     let window_t = T::from_usize(window)?;
//!     let sum: T = data.iter().take(window).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / window_t)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = mean_of_head(&data, 3).unwrap();
//! assert!((result - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};
use crate::series::Column;

/// A trait for types that can be used as elements in a price or indicator series.
///
/// It extends `num_traits::Float` with the conversions and constants the
/// indicators need. NaN is the in-band "undefined" marker for every series.
///
/// # Example
///
/// ```
/// use stock_ta::traits::SeriesElement;
///
/// fn defined_sum<T: SeriesElement>(data: &[T]) -> T {
///     data.iter()
///         .filter(|x| x.is_defined())
///         .fold(T::zero(), |acc, &x| acc + x)
/// }
///
/// let data = vec![1.0_f64, 2.0, f64::NAN, 4.0];
/// assert!((defined_sum(&data) - 7.0).abs() < 1e-10);
/// ```
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// This is commonly used for converting window parameters to the series element type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// Used for the EMA smoothing factor: `alpha = 2 / (span + 1)`.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 100 as this type.
    ///
    /// Used for percentage scaling in RSI, Stochastic and the directional indicators.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        <Self as NumCast>::from(100_u8).unwrap_or_else(Self::nan)
    }

    /// Returns `true` when the value carries a result, i.e. it is not the NaN sentinel.
    #[inline]
    #[must_use]
    fn is_defined(self) -> bool {
        !self.is_nan()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Validates that a window-like parameter is usable.
///
/// `what` names the parameter in the error (`"window"`, `"span"`, `"period"`).
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the value is zero.
#[inline]
pub fn validate_period(period: usize, what: &str) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: match what {
                "span" => "span must be at least 1",
                "period" => "period must be at least 1",
                _ => "window must be at least 1",
            },
        })
    } else {
        Ok(())
    }
}

/// Validates that `data` has exactly `expected` rows.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` naming `column` when the lengths differ.
#[inline]
pub fn validate_column_length<T>(data: &[T], expected: usize, column: Column) -> Result<()> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            column,
            expected,
            actual: data.len(),
        })
    }
}
