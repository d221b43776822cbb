//! Exponential Moving Average (EMA) indicator.
//!
//! The EMA weights recent prices more heavily than the SMA. It is seeded with
//! the first observation itself, so unlike the SMA it has no warm-up.
//!
//! # Formula
//!
//! ```text
//! α = 2 / (span + 1)
//! EMA[0] = P[0]
//! EMA[i] = α × P[i] + (1 - α) × EMA[i-1]
//! ```
//!
//! # Missing values
//!
//! - Leading NaNs stay NaN; the first defined value seeds the average.
//! - A NaN after the seed repeats the previous average at that position. The
//!   weight of the old average keeps decaying by `(1 - α)` per missing step,
//!   so the next observation is blended as
//!   `(w_old × EMA + α × P) / (w_old + α)`.
//! - An observation equal to the running average leaves it untouched, so a
//!   flat series yields exactly its value.
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::ema::ema;
//!
//! let result = ema(&[10.0_f64, 11.0, 12.0], 3).unwrap();
//! assert_eq!(result, vec![10.0, 10.5, 11.25]);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_period, SeriesElement};
use crate::utils::count_defined;

use super::check_output_len;

/// Returns the lookback of the EMA, which is always zero.
#[inline]
#[must_use]
pub const fn ema_lookback(_span: usize) -> usize {
    0
}

/// Smoothing factor for a span: `α = 2 / (span + 1)`.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `span` is zero.
pub fn ema_alpha<T: SeriesElement>(span: usize) -> Result<T> {
    validate_period(span, "span")?;
    let span_plus_one = T::from_usize(span)? + T::one();
    Ok(T::two() / span_plus_one)
}

/// Computes the Exponential Moving Average with `α = 2 / (span + 1)`.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `span` is zero.
///
/// # Example
///
/// ```
/// use stock_ta::indicators::ema::ema;
///
/// let data = vec![f64::NAN, 4.0, 4.0, 7.0];
/// let result = ema(&data, 2).unwrap();
/// assert!(result[0].is_nan());
/// assert_eq!(result[1], 4.0);
/// assert_eq!(result[2], 4.0);
/// assert!((result[3] - 6.0).abs() < 1e-12);
/// ```
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema<T: SeriesElement>(data: &[T], span: usize) -> Result<Vec<T>> {
    let alpha = ema_alpha(span)?;
    Ok(ema_core(data, alpha))
}

/// Computes the EMA into a pre-allocated output buffer.
///
/// Returns the number of defined values written.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `span` is zero
/// - `Error::InvalidParameter` if `output` is shorter than `data`
pub fn ema_into<T: SeriesElement>(data: &[T], span: usize, output: &mut [T]) -> Result<usize> {
    let alpha = ema_alpha(span)?;
    check_output_len(data.len(), output.len())?;
    ema_core_into(data, alpha, &mut output[..data.len()]);
    Ok(count_defined(&output[..data.len()]))
}

/// Computes an EMA with a caller-supplied smoothing factor.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` unless `0 < alpha <= 1`.
pub fn ema_with_alpha<T: SeriesElement>(data: &[T], alpha: T) -> Result<Vec<T>> {
    if !(alpha > T::zero() && alpha <= T::one()) {
        return Err(Error::InvalidParameter {
            name: "alpha",
            reason: "smoothing factor must be in (0, 1]",
        });
    }
    Ok(ema_core(data, alpha))
}

fn ema_core<T: SeriesElement>(data: &[T], alpha: T) -> Vec<T> {
    let mut output = vec![T::nan(); data.len()];
    ema_core_into(data, alpha, &mut output);
    output
}

#[allow(clippy::float_cmp)]
fn ema_core_into<T: SeriesElement>(data: &[T], alpha: T, output: &mut [T]) {
    let decay = T::one() - alpha;
    let mut average = T::nan();
    let mut old_weight = T::one();

    for (out, &value) in output.iter_mut().zip(data) {
        if average.is_nan() {
            // not seeded yet
            average = value;
        } else {
            old_weight = old_weight * decay;
            if value.is_defined() {
                if value != average {
                    average = old_weight.mul_add(average, alpha * value) / (old_weight + alpha);
                }
                old_weight = T::one();
            }
        }
        *out = average;
    }
}
