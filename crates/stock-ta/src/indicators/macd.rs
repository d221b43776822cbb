//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! # Formula
//!
//! ```text
//! MACD Line   = EMA(price, fast) - EMA(price, slow)
//! Signal Line = EMA(MACD Line, signal)
//! Histogram   = MACD Line - Signal Line
//! ```
//!
//! Every EMA is seeded with its first input, so all three lines are defined
//! from the first bar. The spans are not required to satisfy `fast < slow`.
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::macd::Macd;
//!
//! let prices: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i)).collect();
//! let out = Macd::default().compute(&prices).unwrap();
//!
//! assert_eq!(out.macd_line[0], 0.0);
//! assert!(out.macd_line[39] > 0.0); // fast EMA leads in an uptrend
//! assert_eq!(out.histogram[39], out.macd_line[39] - out.signal_line[39]);
//! ```

use crate::error::Result;
use crate::traits::SeriesElement;

use super::ema::ema;

/// Default fast EMA span.
pub const DEFAULT_FAST: usize = 12;
/// Default slow EMA span.
pub const DEFAULT_SLOW: usize = 26;
/// Default signal EMA span.
pub const DEFAULT_SIGNAL: usize = 9;

/// Returns the lookback of every MACD line, which is zero.
#[inline]
#[must_use]
pub const fn macd_lookback() -> usize {
    0
}

/// MACD line, signal line and histogram, each the length of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacdOutput<T> {
    /// Fast EMA minus slow EMA.
    pub macd_line: Vec<T>,
    /// EMA of the MACD line.
    pub signal_line: Vec<T>,
    /// MACD line minus signal line.
    pub histogram: Vec<T>,
}

/// Computes MACD with the given spans.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any span is zero.
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdOutput<T>> {
    let fast_ema = ema(data, fast)?;
    let slow_ema = ema(data, slow)?;

    let macd_line: Vec<T> = fast_ema.iter().zip(&slow_ema).map(|(&f, &s)| f - s).collect();
    let signal_line = ema(&macd_line, signal)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&m, &s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd_line,
        signal_line,
        histogram,
    })
}

/// MACD configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Default for Macd {
    /// Standard parameters (12, 26, 9).
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

impl Macd {
    /// Creates a configuration with standard parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fast EMA span. Default: 12
    pub const fn fast(mut self, fast: usize) -> Self {
        self.fast = fast;
        self
    }

    /// Sets the slow EMA span. Default: 26
    pub const fn slow(mut self, slow: usize) -> Self {
        self.slow = slow;
        self
    }

    /// Sets the signal EMA span. Default: 9
    pub const fn signal(mut self, signal: usize) -> Self {
        self.signal = signal;
        self
    }

    /// Returns the fast span.
    #[must_use]
    pub const fn get_fast(&self) -> usize {
        self.fast
    }

    /// Returns the slow span.
    #[must_use]
    pub const fn get_slow(&self) -> usize {
        self.slow
    }

    /// Returns the signal span.
    #[must_use]
    pub const fn get_signal(&self) -> usize {
        self.signal
    }

    /// Computes MACD using the configured spans.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if any span is zero.
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        macd(data, self.fast, self.slow, self.signal)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;
    use crate::utils::approx_eq;

    const EPSILON: f64 = 1e-10;

    fn sample() -> Vec<f64> {
        (0..80)
            .map(|i| 50.0 + (i as f64 * 0.2).sin() * 4.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_macd_histogram_identity() {
        let data = sample();
        let out = macd(&data, 12, 26, 9).unwrap();
        for i in 0..data.len() {
            assert_eq!(out.histogram[i], out.macd_line[i] - out.signal_line[i]);
        }
    }

    #[test]
    fn test_macd_defined_everywhere() {
        let out = Macd::default().compute(&sample()).unwrap();
        assert!(out.macd_line.iter().all(|v| !v.is_nan()));
        assert!(out.signal_line.iter().all(|v| !v.is_nan()));
        assert!(out.histogram.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_macd_matches_ema_difference() {
        let data = sample();
        let out = macd(&data, 5, 35, 5).unwrap();
        let fast = ema(&data, 5).unwrap();
        let slow = ema(&data, 35).unwrap();
        let signal = ema(&out.macd_line, 5).unwrap();
        for i in 0..data.len() {
            assert!(approx_eq(out.macd_line[i], fast[i] - slow[i], EPSILON));
            assert!(approx_eq(out.signal_line[i], signal[i], EPSILON));
        }
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let out = macd(&vec![10.0_f64; 50], 12, 26, 9).unwrap();
        assert!(out.macd_line.iter().all(|&v| v == 0.0));
        assert!(out.histogram.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_macd_accepts_inverted_spans() {
        let out = macd(&sample(), 26, 12, 9).unwrap();
        let normal = macd(&sample(), 12, 26, 9).unwrap();
        assert!(approx_eq(out.macd_line[40], -normal.macd_line[40], EPSILON));
    }

    #[test]
    fn test_macd_zero_span() {
        assert!(matches!(
            Macd::new().signal(0).compute(&[1.0_f64, 2.0]),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_macd_empty_input() {
        let out = macd::<f64>(&[], 12, 26, 9).unwrap();
        assert!(out.macd_line.is_empty());
        assert_eq!(macd_lookback(), 0);
    }

    #[test]
    fn test_macd_config_accessors() {
        let config = Macd::new().fast(5).slow(35).signal(5);
        assert_eq!((config.get_fast(), config.get_slow(), config.get_signal()), (5, 35, 5));
        assert_eq!(Macd::default(), Macd::new().fast(12).slow(26).signal(9));
    }
}
