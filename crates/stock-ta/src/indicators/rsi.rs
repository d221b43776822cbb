//! Relative Strength Index (RSI) indicator.
//!
//! RSI compares the average size of up-moves to the average size of
//! down-moves over a trailing window and maps the ratio onto 0..=100.
//!
//! # Formula
//!
//! ```text
//! delta[i]  = P[i] - P[i-1]                 (delta[0] undefined)
//! gain[i]   = max(delta[i], 0)
//! loss[i]   = max(-delta[i], 0)
//! avg_gain  = SMA(gain, period)
//! avg_loss  = SMA(loss, period)
//! RSI       = 100 - 100 / (1 + avg_gain / avg_loss)
//! ```
//!
//! The averages are simple rolling means, not Wilder smoothing.
//!
//! # Boundary values
//!
//! - No losses in the window (`avg_loss == 0`, `avg_gain > 0`): exactly 100.
//! - No movement at all (`avg_gain == avg_loss == 0`): NaN, since `0/0` has
//!   no ratio.
//! - Positions `< period` are NaN (`rsi_lookback(period) == period`).
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::rsi::rsi;
//!
//! let rising: Vec<f64> = (1..=20).map(f64::from).collect();
//! let result = rsi(&rising, 14).unwrap();
//!
//! assert!(result[13].is_nan());
//! assert_eq!(result[14], 100.0);
//! ```

use crate::error::Result;
use crate::kernels::rolling::rolling_mean;
use crate::traits::SeriesElement;

/// Default averaging period.
pub const DEFAULT_PERIOD: usize = 14;

/// Returns the lookback of RSI: `period`.
///
/// One extra position is lost to the price difference.
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    period
}

/// Splits price changes into gains and losses; position 0 is NaN in both.
fn gains_and_losses<T: SeriesElement>(data: &[T]) -> (Vec<T>, Vec<T>) {
    let mut gains = Vec::with_capacity(data.len());
    let mut losses = Vec::with_capacity(data.len());
    if !data.is_empty() {
        gains.push(T::nan());
        losses.push(T::nan());
    }
    for pair in data.windows(2) {
        let delta = pair[1] - pair[0];
        if delta.is_nan() {
            gains.push(T::nan());
            losses.push(T::nan());
        } else if delta > T::zero() {
            gains.push(delta);
            losses.push(T::zero());
        } else {
            gains.push(T::zero());
            losses.push(-delta);
        }
    }
    (gains, losses)
}

/// Computes the Relative Strength Index.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let (gains, losses) = gains_and_losses(data);
    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    let hundred = T::hundred();
    Ok(avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| {
            // gain / 0 = inf maps to exactly 100; 0 / 0 stays NaN
            let rs = gain / loss;
            hundred - hundred / (T::one() + rs)
        })
        .collect())
}

/// RSI configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    /// Standard period (14).
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

impl Rsi {
    /// Creates a configuration with the standard period (14).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the averaging period. Default: 14
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Returns the averaging period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the lookback of the configured RSI.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        rsi_lookback(self.period)
    }

    /// Computes RSI using the configured period.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if the period is zero.
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<T>> {
        rsi(data, self.period)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;
    use crate::utils::approx_eq;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_rsi_known_value() {
        // deltas: +1, -0.5, +1, +0.5 -> avg gain 2.5/4, avg loss 0.5/4
        let data = vec![10.0_f64, 11.0, 10.5, 11.5, 12.0];
        let result = rsi(&data, 4).unwrap();
        let rs = 2.5 / 0.5;
        assert!(approx_eq(result[4], 100.0 - 100.0 / (1.0 + rs), EPSILON));
    }

    #[test]
    fn test_rsi_warmup() {
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).cos()).collect();
        let result = rsi(&data, 14).unwrap();
        assert!(result[..14].iter().all(|v| v.is_nan()));
        assert!(result[14..].iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let data: Vec<f64> = (0..20).map(|i| 1.0 + i as f64 * 0.3).collect();
        let result = Rsi::new().period(5).compute(&data).unwrap();
        for &v in &result[5..] {
            assert_eq!(v, 100.0);
        }
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let result = rsi(&data, 5).unwrap();
        for &v in &result[5..] {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_rsi_flat_is_undefined() {
        let data = vec![50.0_f64; 20];
        let result = rsi(&data, 14).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_in_range() {
        let data: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0 + (i as f64 * 0.13).cos() * 3.0)
            .collect();
        let result = rsi(&data, 14).unwrap();
        for &v in result.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_rsi_period_exceeds_length() {
        let result = rsi(&[1.0_f64, 2.0, 3.0], 14).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
        assert!(rsi::<f64>(&[], 14).unwrap().is_empty());
    }

    #[test]
    fn test_rsi_zero_period() {
        assert!(matches!(
            rsi(&[1.0_f64, 2.0], 0),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_rsi_f32() {
        let data: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let result = rsi(&data, 3).unwrap();
        assert_eq!(result[3], 100.0);
        assert_eq!(Rsi::default().lookback(), 14);
    }
}
