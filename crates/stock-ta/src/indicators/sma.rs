//! Simple Moving Average (SMA) indicator.
//!
//! The SMA is the arithmetic mean of the trailing `window` values.
//!
//! # Formula
//!
//! ```text
//! SMA[i] = (P[i-window+1] + ... + P[i]) / window      for i >= window - 1
//! SMA[i] = NaN                                         otherwise
//! ```
//!
//! A window longer than the series produces an all-NaN result rather than an
//! error: "not enough history yet" is a data state, not a caller mistake.
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::sma::sma;
//!
//! let data = vec![10.0_f64, 11.0, 12.0, 11.0, 10.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 11.0).abs() < 1e-10);
//! assert!((result[3] - 34.0 / 3.0).abs() < 1e-10);
//! assert!((result[4] - 11.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::kernels::rolling::{slide_into, RollingMean};
use crate::traits::{validate_period, SeriesElement};
use crate::utils::count_defined;

use super::check_output_len;

/// Returns the lookback of the SMA: `window - 1`.
///
/// ```
/// use stock_ta::indicators::sma::sma_lookback;
///
/// assert_eq!(sma_lookback(50), 49);
/// ```
#[inline]
#[must_use]
pub const fn sma_lookback(window: usize) -> usize {
    window.saturating_sub(1)
}

/// Computes the Simple Moving Average of a data series.
///
/// Returns a vector of the same length as the input. Positions before
/// `window - 1`, and windows containing NaN, are NaN.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
#[must_use = "this returns a Result with the SMA values, which should be used"]
pub fn sma<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    sma_into(data, window, &mut output)?;
    Ok(output)
}

/// Computes the Simple Moving Average into a pre-allocated output buffer.
///
/// Returns the number of defined values written.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `window` is zero
/// - `Error::InvalidParameter` if `output` is shorter than `data`
pub fn sma_into<T: SeriesElement>(data: &[T], window: usize, output: &mut [T]) -> Result<usize> {
    validate_period(window, "window")?;
    check_output_len(data.len(), output.len())?;

    let output = &mut output[..data.len()];
    slide_into(data, window, RollingMean::new(window), output);
    Ok(count_defined(output))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;
    use crate::utils::approx_eq;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3).unwrap();

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(approx_eq(result[2], 2.0, EPSILON));
        assert!(approx_eq(result[3], 3.0, EPSILON));
        assert!(approx_eq(result[4], 4.0, EPSILON));
    }

    #[test]
    fn test_sma_window_equals_length() {
        let data = vec![2.0_f64, 4.0, 6.0];
        let result = sma(&data, 3).unwrap();
        assert!(approx_eq(result[2], 4.0, EPSILON));
    }

    #[test]
    fn test_sma_window_exceeds_length_is_all_nan() {
        let data = vec![1.0_f64, 2.0, 3.0];
        let result = sma(&data, 10).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sma_zero_window() {
        let result = sma(&[1.0_f64, 2.0], 0);
        assert!(matches!(result, Err(Error::InvalidPeriod { period: 0, .. })));
    }

    #[test]
    fn test_sma_empty_input() {
        let result = sma::<f64>(&[], 5).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_sma_f32() {
        let data = vec![1.0_f32, 2.0, 3.0, 4.0];
        let result = sma(&data, 2).unwrap();
        assert!((result[3] - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_sma_into_counts_defined() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let mut output = vec![0.0_f64; 7];
        let defined = sma_into(&data, 2, &mut output).unwrap();
        assert_eq!(defined, 4);
        assert!(output[0].is_nan());
        // trailing buffer space is left untouched
        assert_eq!(output[5], 0.0);
    }

    #[test]
    fn test_sma_into_short_buffer() {
        let mut output = vec![0.0_f64; 2];
        let result = sma_into(&[1.0_f64, 2.0, 3.0], 2, &mut output);
        assert!(matches!(result, Err(Error::InvalidParameter { name: "output", .. })));
    }

    #[test]
    fn test_sma_lookback() {
        assert_eq!(sma_lookback(1), 0);
        assert_eq!(sma_lookback(20), 19);
        assert_eq!(sma_lookback(0), 0);
    }
}
