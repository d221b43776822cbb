//! Stochastic Oscillator indicator.
//!
//! The Stochastic Oscillator locates the close within the high-low range of
//! the trailing `k_window` bars.
//!
//! # Formula
//!
//! ```text
//! LowMin  = rolling_min(Low, k_window)
//! HighMax = rolling_max(High, k_window)
//! %K      = 100 × (Close - LowMin) / (HighMax - LowMin)
//! %D      = SMA(%K, d_window)
//! ```
//!
//! # Zero range
//!
//! When `HighMax == LowMin` the position inside the range is undefined and
//! %K is NaN. That NaN propagates into every %D window that contains it.
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::stochastic::stochastic;
//!
//! let high = vec![10.0_f64, 11.0, 12.0, 13.0, 14.0];
//! let low = vec![8.0_f64, 9.0, 10.0, 11.0, 12.0];
//! let close = vec![9.0_f64, 10.0, 11.0, 12.0, 14.0];
//!
//! let out = stochastic(&high, &low, &close, 3, 2).unwrap();
//! assert!(out.k[1].is_nan());
//! assert!((out.k[2] - 75.0).abs() < 1e-10);  // (11 - 8) / (12 - 8)
//! assert!((out.k[4] - 100.0).abs() < 1e-10); // close at the high
//! assert!(out.d[2].is_nan());
//! ```

use num_traits::Zero;

use crate::error::Result;
use crate::kernels::rolling::rolling_mean;
use crate::kernels::rolling_extrema::rolling_extrema;
use crate::series::{Column, PriceSeries};
use crate::traits::{validate_period, SeriesElement};

use super::check_aligned;

/// Default %K window.
pub const DEFAULT_K_WINDOW: usize = 14;
/// Default %D window.
pub const DEFAULT_D_WINDOW: usize = 3;

const NAME: &str = "Stochastic";

/// Returns the lookback of %K: `k_window - 1`.
#[inline]
#[must_use]
pub const fn stochastic_k_lookback(k_window: usize) -> usize {
    k_window.saturating_sub(1)
}

/// Returns the lookback of %D: `k_window + d_window - 2`.
#[inline]
#[must_use]
pub const fn stochastic_d_lookback(k_window: usize, d_window: usize) -> usize {
    stochastic_k_lookback(k_window) + d_window.saturating_sub(1)
}

/// %K and %D lines, each the length of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StochasticOutput<T> {
    /// The %K line.
    pub k: Vec<T>,
    /// The %D line (moving average of %K).
    pub d: Vec<T>,
}

fn compute_raw_k<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    k_window: usize,
) -> Result<Vec<T>> {
    let extrema = rolling_extrema(high, low, k_window)?;
    let hundred = T::hundred();

    Ok(close
        .iter()
        .zip(extrema.max.iter().zip(&extrema.min))
        .map(|(&c, (&high_max, &low_min))| {
            let range = high_max - low_min;
            if range.is_zero() {
                T::nan()
            } else {
                hundred * (c - low_min) / range
            }
        })
        .collect())
}

/// Computes the Stochastic Oscillator from high, low and close columns.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if either window is zero
/// - `Error::LengthMismatch` if the columns differ in length
pub fn stochastic<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    k_window: usize,
    d_window: usize,
) -> Result<StochasticOutput<T>> {
    validate_period(k_window, "window")?;
    validate_period(d_window, "window")?;
    check_aligned(&[(Column::High, high), (Column::Low, low), (Column::Close, close)])?;

    let k = compute_raw_k(high, low, close, k_window)?;
    let d = rolling_mean(&k, d_window)?;
    Ok(StochasticOutput { k, d })
}

/// Stochastic Oscillator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Stochastic {
    k_window: usize,
    d_window: usize,
}

impl Default for Stochastic {
    /// Standard parameters (14, 3).
    fn default() -> Self {
        Self {
            k_window: DEFAULT_K_WINDOW,
            d_window: DEFAULT_D_WINDOW,
        }
    }
}

impl Stochastic {
    /// Creates a configuration with standard parameters (14, 3).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the %K window. Default: 14
    pub const fn k_window(mut self, k_window: usize) -> Self {
        self.k_window = k_window;
        self
    }

    /// Sets the %D window. Default: 3
    pub const fn d_window(mut self, d_window: usize) -> Self {
        self.d_window = d_window;
        self
    }

    /// Returns the %K window.
    #[must_use]
    pub const fn get_k_window(&self) -> usize {
        self.k_window
    }

    /// Returns the %D window.
    #[must_use]
    pub const fn get_d_window(&self) -> usize {
        self.d_window
    }

    /// Computes the oscillator from explicit columns.
    ///
    /// # Errors
    ///
    /// See [`stochastic`].
    pub fn compute<T: SeriesElement>(
        &self,
        high: &[T],
        low: &[T],
        close: &[T],
    ) -> Result<StochasticOutput<T>> {
        stochastic(high, low, close, self.k_window, self.d_window)
    }

    /// Computes the oscillator over a price series.
    ///
    /// All four price columns must be present, even though Open is not read.
    ///
    /// # Errors
    ///
    /// - `Error::MissingColumn` if any of Open, High, Low, Close is absent
    /// - `Error::InvalidPeriod` if either window is zero
    pub fn compute_series<T: SeriesElement>(
        &self,
        series: &PriceSeries<T>,
    ) -> Result<StochasticOutput<T>> {
        let ohlc = series.require_ohlc(NAME)?;
        self.compute(ohlc.high, ohlc.low, ohlc.close)
    }
}
