//! Bollinger Bands indicator.
//!
//! Bollinger Bands are a volatility envelope around a moving average:
//! - **Middle Band**: Simple Moving Average of the price
//! - **Upper Band**: Middle Band + (k × standard deviation)
//! - **Lower Band**: Middle Band - (k × standard deviation)
//!
//! # Mathematical Conventions
//!
//! - **Sample Standard Deviation**: Uses ÷(n-1). A one-element window therefore
//!   has an undefined deviation, and its bands are NaN while the middle line is
//!   defined.
//! - **Flat windows**: a window of identical prices has a deviation of exactly
//!   zero, so all three bands coincide.
//!
//! # Formula
//!
//! ```text
//! Middle = SMA(price, window)
//! Std    = sqrt(sum((price - Middle)^2) / (window - 1))
//! Upper  = Middle + k × Std
//! Lower  = Middle - k × Std
//! ```
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::bollinger::Bollinger;
//!
//! let data = vec![20.0_f64, 21.0, 22.0, 21.5, 22.5, 23.0, 22.0, 21.0, 20.5, 21.5];
//! let result = Bollinger::default().window(5).compute(&data).unwrap();
//!
//! assert!(result.middle[3].is_nan());
//! assert!(result.upper[4] > result.middle[4]);
//! assert!(result.middle[4] > result.lower[4]);
//! ```

use crate::error::{Error, Result};
use crate::kernels::rolling::rolling_std;
use crate::traits::SeriesElement;

use super::sma::{sma, sma_lookback};

/// Default averaging window.
pub const DEFAULT_WINDOW: usize = 20;
/// Default band width in standard deviations.
pub const DEFAULT_NUM_STD: f64 = 2.0;

/// Returns the lookback of the bands: `window - 1`.
#[inline]
#[must_use]
pub const fn bollinger_lookback(window: usize) -> usize {
    sma_lookback(window)
}

/// The three Bollinger Bands, each the length of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BollingerOutput<T> {
    /// The middle band (Simple Moving Average).
    pub middle: Vec<T>,
    /// The upper band (middle + k × stddev).
    pub upper: Vec<T>,
    /// The lower band (middle - k × stddev).
    pub lower: Vec<T>,
}

/// Rolling sample standard deviation over `window` values.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_stddev<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    rolling_std(data, window, 1)
}

/// Computes Bollinger Bands for a data series.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `window` is zero
/// - `Error::InvalidParameter` if `num_std` is negative or not finite
pub fn bollinger<T: SeriesElement>(
    data: &[T],
    window: usize,
    num_std: T,
) -> Result<BollingerOutput<T>> {
    if !num_std.is_finite() || num_std < T::zero() {
        return Err(Error::InvalidParameter {
            name: "num_std",
            reason: "must be finite and non-negative",
        });
    }

    let middle = sma(data, window)?;
    let std = rolling_stddev(data, window)?;

    let (upper, lower) = middle
        .iter()
        .zip(&std)
        .map(|(&m, &s)| (num_std.mul_add(s, m), (-num_std).mul_add(s, m)))
        .unzip();

    Ok(BollingerOutput {
        middle,
        upper,
        lower,
    })
}

/// Bollinger Bands configuration.
///
/// ```
/// use stock_ta::indicators::bollinger::Bollinger;
///
/// let config = Bollinger::new().window(10).num_std(2.5);
/// assert_eq!(config.get_window(), 10);
/// assert_eq!(config.get_num_std(), 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct Bollinger {
    window: usize,
    num_std: f64,
}

impl Default for Bollinger {
    /// Standard parameters (20, 2.0).
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            num_std: DEFAULT_NUM_STD,
        }
    }
}

impl Bollinger {
    /// Creates a configuration with standard parameters (20, 2.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the averaging window.
    ///
    /// Default: 20
    pub const fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the band width in standard deviations.
    ///
    /// Default: 2.0
    pub const fn num_std(mut self, num_std: f64) -> Self {
        self.num_std = num_std;
        self
    }

    /// Returns the averaging window.
    #[must_use]
    pub const fn get_window(&self) -> usize {
        self.window
    }

    /// Returns the band width in standard deviations.
    #[must_use]
    pub const fn get_num_std(&self) -> f64 {
        self.num_std
    }

    /// Returns the lookback of the configured bands.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        bollinger_lookback(self.window)
    }

    /// Computes Bollinger Bands using the configured parameters.
    ///
    /// # Errors
    ///
    /// See [`bollinger`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<BollingerOutput<T>> {
        bollinger(data, self.window, T::from_f64(self.num_std)?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::utils::approx_eq;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_bollinger_known_values() {
        // window [1, 2, 3, 4, 5]: mean 3, sample std sqrt(2.5)
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let result = bollinger(&data, 5, 2.0).unwrap();
        let std = 2.5_f64.sqrt();

        assert!(approx_eq(result.middle[4], 3.0, EPSILON));
        assert!(approx_eq(result.upper[4], 3.0 + 2.0 * std, EPSILON));
        assert!(approx_eq(result.lower[4], 3.0 - 2.0 * std, EPSILON));
    }

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let data = vec![7.3_f64; 30];
        let result = Bollinger::default().compute(&data).unwrap();
        for i in 19..30 {
            assert_eq!(result.upper[i], result.middle[i]);
            assert_eq!(result.lower[i], result.middle[i]);
            assert_eq!(result.middle[i], 7.3);
        }
    }

    #[test]
    fn test_bollinger_window_one() {
        let data = vec![1.0_f64, 2.0, 3.0];
        let result = bollinger(&data, 1, 2.0).unwrap();
        assert_eq!(result.middle, data);
        assert!(result.upper.iter().all(|v| v.is_nan()));
        assert!(result.lower.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_bollinger_window_exceeds_length() {
        let data = vec![1.0_f64, 2.0, 3.0];
        let result = bollinger(&data, 20, 2.0).unwrap();
        assert!(result.middle.iter().all(|v| v.is_nan()));
        assert!(result.upper.iter().all(|v| v.is_nan()));
        assert!(result.lower.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_bollinger_symmetric_around_middle() {
        let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64).sin() * 3.0).collect();
        let result = bollinger(&data, 10, 2.5).unwrap();
        for i in 9..50 {
            let up = result.upper[i] - result.middle[i];
            let down = result.middle[i] - result.lower[i];
            assert!(approx_eq(up, down, 1e-9));
            assert!(up >= 0.0);
        }
    }

    #[test]
    fn test_bollinger_zero_num_std() {
        let data = vec![1.0_f64, 5.0, 2.0, 8.0];
        let result = bollinger(&data, 2, 0.0).unwrap();
        assert_eq!(result.upper[3], result.middle[3]);
    }

    #[test]
    fn test_bollinger_rejects_bad_num_std() {
        let data = vec![1.0_f64, 2.0];
        assert!(matches!(
            bollinger(&data, 2, -1.0),
            Err(Error::InvalidParameter { name: "num_std", .. })
        ));
        assert!(bollinger(&data, 2, f64::INFINITY).is_err());
        assert!(bollinger(&data, 2, f64::NAN).is_err());
    }

    #[test]
    fn test_bollinger_zero_window() {
        assert!(matches!(
            Bollinger::new().window(0).compute(&[1.0_f64]),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_bollinger_nan_in_data() {
        let data = vec![1.0_f64, 2.0, f64::NAN, 4.0, 5.0, 6.0];
        let result = bollinger(&data, 2, 2.0).unwrap();
        assert!(result.middle[2].is_nan());
        assert!(result.upper[3].is_nan());
        assert!(!result.upper[4].is_nan());
    }

    #[test]
    fn test_bollinger_f32() {
        let data = vec![1.0_f32, 2.0, 3.0, 4.0, 5.0];
        let result = Bollinger::new().window(5).num_std(1.0).compute(&data).unwrap();
        assert!((result.upper[4] - (3.0 + 2.5_f32.sqrt())).abs() < 1e-5);
    }

    #[test]
    fn test_rolling_stddev_basic() {
        let result = rolling_stddev(&[2.0_f64, 4.0, 6.0], 3).unwrap();
        assert!(approx_eq(result[2], 2.0, EPSILON));
    }

    #[test]
    fn test_config_defaults_and_lookback() {
        let config = Bollinger::default();
        assert_eq!(config.get_window(), 20);
        assert_eq!(config.get_num_std(), 2.0);
        assert_eq!(config.lookback(), 19);
    }
}
