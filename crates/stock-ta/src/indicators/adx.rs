//! Average Directional Index (ADX) and Directional Movement (DMI).
//!
//! # Formula
//!
//! ```text
//! +DM[i] = max(High[i] - High[i-1], 0)
//! -DM[i] = max(Low[i-1] - Low[i], 0)
//! TR[i]  = max(High[i] - Low[i], |High[i] - Close[i-1]|, |Low[i] - Close[i-1]|)
//! ATR    = SMA(TR, period)
//! +DI    = 100 × SMA(+DM, period) / ATR
//! -DI    = 100 × SMA(-DM, period) / ATR
//! DX     = 100 × |+DI - -DI| / (+DI + -DI)
//! ADX    = SMA(DX, period)
//! ```
//!
//! Smoothing uses simple rolling means throughout, not Wilder's recursive
//! smoothing, so values differ from Wilder-based references.
//!
//! Position 0 has no previous bar: both directional movements are undefined
//! there and the true range falls back to `High - Low`. As a result the
//! directional indicators are defined from `period` and ADX from
//! `2 × period - 1`.
//!
//! When `+DI + -DI == 0` (no directional movement in the window) DX is NaN,
//! and that NaN flows into ADX; it is never an error.
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::adx::{adx, adx_lookback};
//!
//! let high: Vec<f64> = (0..40).map(|i| 11.0 + f64::from(i)).collect();
//! let low: Vec<f64> = (0..40).map(|i| 9.0 + f64::from(i)).collect();
//! let close: Vec<f64> = (0..40).map(|i| 10.0 + f64::from(i)).collect();
//!
//! let out = adx(&high, &low, &close, 14).unwrap();
//! assert!(out.adx[adx_lookback(14) - 1].is_nan());
//! assert!((out.adx[adx_lookback(14)] - 100.0).abs() < 1e-10); // pure uptrend
//! assert_eq!(out.minus_di[20], 0.0);
//! ```

use crate::error::Result;
use crate::kernels::rolling::rolling_mean;
use crate::series::{Column, PriceSeries};
use crate::traits::{validate_period, SeriesElement};

use super::check_aligned;

/// Default smoothing period.
pub const DEFAULT_PERIOD: usize = 14;

const NAME: &str = "ADX";

/// Returns the lookback of +DI and -DI: `period`.
#[inline]
#[must_use]
pub const fn di_lookback(period: usize) -> usize {
    period
}

/// Returns the lookback of ADX: `2 × period - 1`.
#[inline]
#[must_use]
pub const fn adx_lookback(period: usize) -> usize {
    (2 * period).saturating_sub(1)
}

/// ADX line with its two directional indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdxOutput<T> {
    /// Average Directional Index.
    pub adx: Vec<T>,
    /// Positive directional indicator (+DI).
    pub plus_di: Vec<T>,
    /// Negative directional indicator (-DI).
    pub minus_di: Vec<T>,
}

/// Largest defined value among `values`, NaN if none is defined.
fn max_defined<T: SeriesElement>(values: [T; 3]) -> T {
    values
        .into_iter()
        .filter(|v| v.is_defined())
        .fold(T::nan(), |acc, v| if acc.is_nan() || v > acc { v } else { acc })
}

/// Positive part of a difference, keeping NaN as NaN.
fn positive_part<T: SeriesElement>(delta: T) -> T {
    if delta.is_nan() || delta > T::zero() {
        delta
    } else {
        T::zero()
    }
}

/// Computes the true range of each bar.
///
/// The first bar has no previous close, so its true range is `High - Low`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if the columns differ in length.
pub fn true_range<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    check_aligned(&[(Column::High, high), (Column::Low, low), (Column::Close, close)])?;

    Ok((0..high.len())
        .map(|i| {
            let prev_close = if i == 0 { T::nan() } else { close[i - 1] };
            max_defined([
                high[i] - low[i],
                (high[i] - prev_close).abs(),
                (low[i] - prev_close).abs(),
            ])
        })
        .collect())
}

fn directional_movement<T: SeriesElement>(high: &[T], low: &[T]) -> (Vec<T>, Vec<T>) {
    let mut plus_dm = Vec::with_capacity(high.len());
    let mut minus_dm = Vec::with_capacity(high.len());
    if !high.is_empty() {
        plus_dm.push(T::nan());
        minus_dm.push(T::nan());
    }
    for i in 1..high.len() {
        plus_dm.push(positive_part(high[i] - high[i - 1]));
        minus_dm.push(positive_part(low[i - 1] - low[i]));
    }
    (plus_dm, minus_dm)
}

/// Computes ADX, +DI and -DI.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is zero
/// - `Error::LengthMismatch` if the columns differ in length
pub fn adx<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<AdxOutput<T>> {
    validate_period(period, "period")?;

    let tr = true_range(high, low, close)?;
    let atr = rolling_mean(&tr, period)?;

    let (plus_dm, minus_dm) = directional_movement(high, low);
    let plus_dm_avg = rolling_mean(&plus_dm, period)?;
    let minus_dm_avg = rolling_mean(&minus_dm, period)?;

    let hundred = T::hundred();
    let plus_di: Vec<T> = plus_dm_avg
        .iter()
        .zip(&atr)
        .map(|(&dm, &range)| hundred * dm / range)
        .collect();
    let minus_di: Vec<T> = minus_dm_avg
        .iter()
        .zip(&atr)
        .map(|(&dm, &range)| (hundred * dm / range).abs())
        .collect();

    let dx: Vec<T> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(&p, &m)| hundred * (p - m).abs() / (p + m))
        .collect();
    let adx = rolling_mean(&dx, period)?;

    Ok(AdxOutput {
        adx,
        plus_di,
        minus_di,
    })
}

/// ADX/DMI configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    /// Standard period (14).
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

impl Adx {
    /// Creates a configuration with the standard period (14).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the smoothing period. Default: 14
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Returns the smoothing period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Computes ADX from explicit columns.
    ///
    /// # Errors
    ///
    /// See [`adx`].
    pub fn compute<T: SeriesElement>(&self, high: &[T], low: &[T], close: &[T]) -> Result<AdxOutput<T>> {
        adx(high, low, close, self.period)
    }

    /// Computes ADX over a price series.
    ///
    /// All four price columns must be present.
    ///
    /// # Errors
    ///
    /// - `Error::MissingColumn` if any of Open, High, Low, Close is absent
    /// - `Error::InvalidPeriod` if the period is zero
    pub fn compute_series<T: SeriesElement>(&self, series: &PriceSeries<T>) -> Result<AdxOutput<T>> {
        let ohlc = series.require_ohlc(NAME)?;
        self.compute(ohlc.high, ohlc.low, ohlc.close)
    }
}
