//! Utility functions for stock-ta.
//!
//! NaN-aware tolerance comparisons and helpers for inspecting the undefined
//! (NaN) warm-up region of indicator output.
//!
//! # Example
//!
//! ```
//! use stock_ta::utils::{approx_eq, first_defined, EPSILON};
//!
//! assert!(approx_eq(1.0 / 3.0, 0.333333333333333, EPSILON));
//!
//! let sma = [f64::NAN, f64::NAN, 11.0, 11.5];
//! assert_eq!(first_defined(&sma), Some(2));
//! ```

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for results that accumulate many floating-point operations.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Returns `true` if `value` is defined (not the NaN sentinel).
///
/// Free-function form of [`SeriesElement::is_defined`], convenient in iterator
/// adaptors.
#[inline]
#[must_use]
pub fn is_defined<T: SeriesElement>(value: T) -> bool {
    value.is_defined()
}

/// Approximate equality check for floating-point values.
///
/// Two undefined values compare equal; an undefined value never equals a
/// defined one.
///
/// ```
/// use stock_ta::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 0.0, EPSILON));
/// ```
#[inline]
#[must_use]
#[allow(clippy::float_cmp)]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    match (a.is_defined(), b.is_defined()) {
        (false, false) => true,
        (true, true) => a == b || (a - b).abs() < tolerance,
        _ => false,
    }
}

/// Element-wise [`approx_eq`] over two series of equal length.
#[must_use]
pub fn series_approx_eq<T: SeriesElement>(a: &[T], b: &[T], tolerance: T) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| approx_eq(x, y, tolerance))
}

/// Number of defined values in a series.
#[inline]
#[must_use]
pub fn count_defined<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_defined()).count()
}

/// Length of the undefined prefix of a series, i.e. its observed warm-up.
///
/// ```
/// use stock_ta::utils::count_nan_prefix;
///
/// let data = [f64::NAN, f64::NAN, 1.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

/// Position of the first defined value, if any.
#[inline]
#[must_use]
pub fn first_defined<T: SeriesElement>(data: &[T]) -> Option<usize> {
    data.iter().position(|x| x.is_defined())
}
