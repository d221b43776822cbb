//! Volume Weighted Average Price (VWAP) indicator.
//!
//! VWAP is the ratio of value traded to volume traded, accumulated from the
//! first bar of the series (anchored, no window and no session resets).
//!
//! # Algorithm
//!
//! ```text
//! VWAP[i] = cumsum(Close × Volume)[i] / cumsum(Volume)[i]
//! ```
//!
//! # NaN Handling
//!
//! - A bar with a NaN close or volume is NaN at its own position. Its NaN
//!   product is left out of the value sum, but a defined volume still counts
//!   toward the cumulative volume; later bars continue from those totals.
//! - While the cumulative volume is zero the average is undefined (NaN).
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::vwap::vwap;
//!
//! let close = vec![10.0_f64, 11.0, 12.0];
//! let volume = vec![100.0_f64, 100.0, 100.0];
//!
//! let result = vwap(&close, &volume).unwrap();
//! assert_eq!(result, vec![10.0, 10.5, 11.0]);
//! ```

use num_traits::Zero;

use crate::error::Result;
use crate::series::{Column, PriceSeries};
use crate::traits::SeriesElement;

use super::check_aligned;

const NAME: &str = "VWAP";

/// Returns the lookback of VWAP, which is zero.
#[inline]
#[must_use]
pub const fn vwap_lookback() -> usize {
    0
}

/// Computes the anchored VWAP of closing prices.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `volume` and `close` differ in length.
#[must_use = "this returns a Result with VWAP values, which should be used"]
pub fn vwap<T: SeriesElement>(close: &[T], volume: &[T]) -> Result<Vec<T>> {
    check_aligned(&[(Column::Close, close), (Column::Volume, volume)])?;

    let mut cumulative_value = T::zero();
    let mut cumulative_volume = T::zero();

    Ok(close
        .iter()
        .zip(volume)
        .map(|(&price, &vol)| {
            if vol.is_nan() {
                return T::nan();
            }
            cumulative_volume = cumulative_volume + vol;
            if price.is_nan() {
                return T::nan();
            }
            cumulative_value = price.mul_add(vol, cumulative_value);
            if cumulative_volume.is_zero() {
                T::nan()
            } else {
                cumulative_value / cumulative_volume
            }
        })
        .collect())
}

/// Computes the anchored VWAP over a price series.
///
/// # Errors
///
/// Returns `Error::MissingColumn` if the Close or Volume column is absent.
pub fn vwap_series<T: SeriesElement>(series: &PriceSeries<T>) -> Result<Vec<T>> {
    let close = series.column(Column::Close, NAME)?;
    let volume = series.column(Column::Volume, NAME)?;
    vwap(close, volume)
}
