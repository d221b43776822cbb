//! Sliding-window mean and variance.
//!
//! Every windowed average in the crate (SMA, the Bollinger middle line, RSI
//! averages, Stochastic %D, ATR/DI/ADX smoothing) goes through this module so
//! that warm-up, NaN propagation and flat-window behaviour are identical
//! everywhere.
//!
//! # Semantics
//!
//! - A window is reduced only once it holds `window` observations; output
//!   positions `< window - 1` are NaN.
//! - A NaN anywhere inside the window makes that window NaN.
//! - A window of identical values reduces to exactly that value (mean) and
//!   exactly zero (variance), regardless of accumulated rounding.
//! - The running sum is Kahan-compensated; the variance uses an add/remove
//!   Welford update with compensation.
//!
//! # Example
//!
//! ```
//! use stock_ta::kernels::rolling::{rolling_mean, rolling_std};
//!
//! let data = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let mean = rolling_mean(&data, 8).unwrap();
//! assert!((mean[7] - 5.0).abs() < 1e-12);
//!
//! // sample standard deviation (ddof = 1)
//! let std = rolling_std(&data, 8, 1).unwrap();
//! assert!((std[7] - 2.138_089_935_299_395).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::traits::{validate_period, SeriesElement};

/// An accumulator that can be slid over a window one observation at a time.
pub trait WindowAccumulator<T> {
    /// Adds the observation entering the window.
    fn push(&mut self, value: T);
    /// Removes the observation leaving the window.
    fn pop(&mut self, value: T);
    /// Current reduction of the window, NaN when it is not fully observed.
    fn value(&self) -> T;
}

/// Compensated running sum producing the window mean.
#[derive(Debug, Clone)]
pub struct RollingMean<T> {
    window: usize,
    nobs: usize,
    neg_ct: usize,
    sum: T,
    compensation: T,
    same_run: usize,
    prev_value: T,
}

impl<T: SeriesElement> RollingMean<T> {
    /// Creates an empty accumulator for a window of `window` observations.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            window,
            nobs: 0,
            neg_ct: 0,
            sum: T::zero(),
            compensation: T::zero(),
            same_run: 0,
            prev_value: T::nan(),
        }
    }

    fn add_compensated(&mut self, value: T) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for RollingMean<T> {
    // exact repeats are tracked so a constant window returns the value itself
    #[allow(clippy::float_cmp)]
    fn push(&mut self, value: T) {
        if value.is_nan() {
            return;
        }
        self.nobs += 1;
        self.add_compensated(value);
        if value.is_sign_negative() {
            self.neg_ct += 1;
        }
        if value == self.prev_value {
            self.same_run += 1;
        } else {
            self.same_run = 1;
        }
        self.prev_value = value;
    }

    fn pop(&mut self, value: T) {
        if value.is_nan() {
            return;
        }
        self.nobs -= 1;
        self.add_compensated(-value);
        if value.is_sign_negative() {
            self.neg_ct -= 1;
        }
    }

    fn value(&self) -> T {
        if self.nobs < self.window || self.nobs == 0 {
            return T::nan();
        }
        if self.same_run >= self.nobs {
            return self.prev_value;
        }
        let Ok(nobs) = T::from_usize(self.nobs) else {
            return T::nan();
        };
        let mean = self.sum / nobs;
        // rounding must not flip the sign of a one-signed window
        if (self.neg_ct == 0 && mean < T::zero()) || (self.neg_ct == self.nobs && mean > T::zero()) {
            T::zero()
        } else {
            mean
        }
    }
}

/// Running variance with `ddof` delta degrees of freedom.
#[derive(Debug, Clone)]
pub struct RollingVariance<T> {
    window: usize,
    ddof: usize,
    nobs: usize,
    mean: T,
    ssqdm: T,
    compensation: T,
    same_run: usize,
    prev_value: T,
}

impl<T: SeriesElement> RollingVariance<T> {
    /// Creates an empty accumulator; `ddof = 1` yields the sample variance.
    #[must_use]
    pub fn new(window: usize, ddof: usize) -> Self {
        Self {
            window,
            ddof,
            nobs: 0,
            mean: T::zero(),
            ssqdm: T::zero(),
            compensation: T::zero(),
            same_run: 0,
            prev_value: T::nan(),
        }
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for RollingVariance<T> {
    #[allow(clippy::float_cmp)]
    fn push(&mut self, value: T) {
        if value.is_nan() {
            return;
        }
        if value == self.prev_value {
            self.same_run += 1;
        } else {
            self.same_run = 1;
        }
        self.prev_value = value;

        self.nobs += 1;
        let Ok(nobs) = T::from_usize(self.nobs) else {
            return;
        };
        let prev_mean = self.mean - self.compensation;
        let y = value - self.compensation;
        let delta = y - self.mean;
        self.compensation = (delta + self.mean) - y;
        self.mean = self.mean + delta / nobs;
        self.ssqdm = (value - prev_mean).mul_add(value - self.mean, self.ssqdm);
    }

    fn pop(&mut self, value: T) {
        if value.is_nan() {
            return;
        }
        self.nobs -= 1;
        if self.nobs == 0 {
            self.mean = T::zero();
            self.ssqdm = T::zero();
            self.compensation = T::zero();
            return;
        }
        let Ok(nobs) = T::from_usize(self.nobs) else {
            return;
        };
        let prev_mean = self.mean - self.compensation;
        let y = value - self.compensation;
        let delta = y - self.mean;
        self.compensation = (delta + self.mean) - y;
        self.mean = self.mean - delta / nobs;
        self.ssqdm = (prev_mean - value).mul_add(value - self.mean, self.ssqdm);
    }

    fn value(&self) -> T {
        if self.nobs < self.window || self.nobs <= self.ddof {
            return T::nan();
        }
        if self.same_run >= self.nobs || self.nobs == 1 {
            return T::zero();
        }
        let Ok(denom) = T::from_usize(self.nobs - self.ddof) else {
            return T::nan();
        };
        let var = self.ssqdm / denom;
        if var < T::zero() {
            T::zero()
        } else {
            var
        }
    }
}

/// Slides `acc` over `data`, writing one reduction per position into `output`.
///
/// `output` must be at least as long as `data`.
pub fn slide_into<T, A>(data: &[T], window: usize, mut acc: A, output: &mut [T])
where
    T: SeriesElement,
    A: WindowAccumulator<T>,
{
    for (i, &value) in data.iter().enumerate() {
        if i >= window {
            acc.pop(data[i - window]);
        }
        acc.push(value);
        output[i] = if i + 1 >= window { acc.value() } else { T::nan() };
    }
}

/// Rolling arithmetic mean over `window` observations.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_mean<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    validate_period(window, "window")?;
    let mut output = vec![T::nan(); data.len()];
    slide_into(data, window, RollingMean::new(window), &mut output);
    Ok(output)
}

/// Rolling variance over `window` observations with `ddof` degrees of freedom.
///
/// Windows with `window <= ddof` observations are undefined.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_var<T: SeriesElement>(data: &[T], window: usize, ddof: usize) -> Result<Vec<T>> {
    validate_period(window, "window")?;
    let mut output = vec![T::nan(); data.len()];
    slide_into(data, window, RollingVariance::new(window, ddof), &mut output);
    Ok(output)
}

/// Rolling standard deviation, the square root of [`rolling_var`].
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_std<T: SeriesElement>(data: &[T], window: usize, ddof: usize) -> Result<Vec<T>> {
    let mut output = rolling_var(data, window, ddof)?;
    for value in &mut output {
        *value = value.sqrt();
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::approx_eq;

    const EPSILON: f64 = 1e-10;

    fn naive_mean(window: &[f64]) -> f64 {
        window.iter().sum::<f64>() / window.len() as f64
    }

    fn naive_sample_var(window: &[f64]) -> f64 {
        let m = naive_mean(window);
        window.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (window.len() - 1) as f64
    }

    // ==================== rolling_mean Tests ====================

    #[test]
    fn test_rolling_mean_basic() {
        let data = [10.0_f64, 11.0, 12.0, 11.0, 10.0];
        let result = rolling_mean(&data, 3).unwrap();
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(approx_eq(result[2], 11.0, EPSILON));
        assert!(approx_eq(result[3], 34.0 / 3.0, EPSILON));
        assert!(approx_eq(result[4], 11.0, EPSILON));
    }

    #[test]
    fn test_rolling_mean_matches_naive() {
        let data: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin() * 50.0 + 100.0).collect();
        let result = rolling_mean(&data, 7).unwrap();
        for i in 6..data.len() {
            assert!(approx_eq(result[i], naive_mean(&data[i - 6..=i]), 1e-9));
        }
    }

    #[test]
    fn test_rolling_mean_window_one_is_identity() {
        let data = [3.0_f64, -1.5, 2.25];
        assert_eq!(rolling_mean(&data, 1).unwrap(), data.to_vec());
    }

    #[test]
    fn test_rolling_mean_nan_poisons_window() {
        let data = [1.0_f64, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
        let result = rolling_mean(&data, 3).unwrap();
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        assert!(approx_eq(result[5], 5.0, EPSILON));
        assert!(approx_eq(result[6], 6.0, EPSILON));
    }

    #[test]
    fn test_rolling_mean_flat_window_is_exact() {
        // 0.1 accumulates rounding error in a plain running sum
        let mut data = vec![0.7_f64, 12.3, 0.2];
        data.extend(std::iter::repeat(0.1).take(20));
        let result = rolling_mean(&data, 5).unwrap();
        for value in &result[7..] {
            assert_eq!(*value, 0.1);
        }
    }

    #[test]
    fn test_rolling_mean_non_negative_window_never_negative() {
        let data = [1e15_f64, 0.0, 0.0, 1e-3, 0.0, 0.0];
        let result = rolling_mean(&data, 3).unwrap();
        assert!(result[2..].iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_rolling_mean_window_exceeds_length() {
        let result = rolling_mean(&[1.0_f64, 2.0], 5).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_mean_empty_and_zero_window() {
        assert!(rolling_mean::<f64>(&[], 3).unwrap().is_empty());
        assert!(matches!(
            rolling_mean(&[1.0_f64], 0),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }

    // ==================== rolling_var / rolling_std Tests ====================

    #[test]
    fn test_rolling_var_matches_naive() {
        let data: Vec<f64> = (0..150).map(|i| (i as f64 * 0.21).cos() * 10.0 + 40.0).collect();
        let result = rolling_var(&data, 10, 1).unwrap();
        for i in 9..data.len() {
            assert!(approx_eq(result[i], naive_sample_var(&data[i - 9..=i]), 1e-8));
        }
    }

    #[test]
    fn test_rolling_var_population() {
        let data = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = rolling_var(&data, 8, 0).unwrap();
        assert!(approx_eq(result[7], 4.0, EPSILON));
    }

    #[test]
    fn test_rolling_var_flat_window_is_zero() {
        let mut data = vec![5.0_f64, 9.0, 1.0];
        data.extend(std::iter::repeat(101.37).take(10));
        let result = rolling_std(&data, 4, 1).unwrap();
        for value in &result[6..] {
            assert_eq!(*value, 0.0);
        }
    }

    #[test]
    fn test_rolling_std_window_one_undefined_with_sample_ddof() {
        let result = rolling_std(&[1.0_f64, 2.0, 3.0], 1, 1).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));

        let population = rolling_std(&[1.0_f64, 2.0, 3.0], 1, 0).unwrap();
        assert!(population.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rolling_var_nan_poisons_window() {
        let data = [1.0_f64, f64::NAN, 3.0, 4.0, 5.0];
        let result = rolling_var(&data, 2, 1).unwrap();
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(approx_eq(result[3], 0.5, EPSILON));
        assert!(approx_eq(result[4], 0.5, EPSILON));
    }

    #[test]
    fn test_rolling_std_f32() {
        let data = [1.0_f32, 2.0, 3.0, 4.0];
        let result = rolling_std(&data, 2, 1).unwrap();
        assert!((result[3] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }
}
