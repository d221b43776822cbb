//! Shared test utilities for stock-ta tests.

use std::path::PathBuf;

use serde::Deserialize;
use stock_ta::series::{Bar, PriceSeries};

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Count the number of NaN values in a slice.
#[allow(dead_code)]
pub fn count_nans(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Verify that the first `n` values are NaN and the rest are not.
#[allow(dead_code)]
pub fn verify_nan_prefix(data: &[f64], expected_nan_count: usize) -> bool {
    data.iter()
        .enumerate()
        .all(|(i, v)| v.is_nan() == (i < expected_nan_count))
}

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Loads `tests/fixtures/ohlcv.csv` as a full OHLCV series.
#[allow(dead_code)]
pub fn load_ohlcv_fixture() -> PriceSeries<f64> {
    let mut reader = csv::Reader::from_path(fixture_path("ohlcv.csv")).unwrap();
    let bars: Vec<Bar<f64>> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    PriceSeries::from_bars(&bars).unwrap()
}

/// One row of `tests/fixtures/expected.csv`; blank cells are undefined.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ExpectedRow {
    pub timestamp: i64,
    #[serde(rename = "SMA20")]
    pub sma20: Option<f64>,
    #[serde(rename = "EMA13")]
    pub ema13: Option<f64>,
    #[serde(rename = "BB_Upper")]
    pub bb_upper: Option<f64>,
    #[serde(rename = "BB_Lower")]
    pub bb_lower: Option<f64>,
    #[serde(rename = "RSI")]
    pub rsi: Option<f64>,
    #[serde(rename = "MACD_Histo")]
    pub macd_histo: Option<f64>,
    #[serde(rename = "Stoch_K")]
    pub stoch_k: Option<f64>,
    #[serde(rename = "Stoch_D")]
    pub stoch_d: Option<f64>,
    #[serde(rename = "ADX")]
    pub adx: Option<f64>,
    #[serde(rename = "ADX_Plus_Di")]
    pub adx_plus_di: Option<f64>,
    #[serde(rename = "VWAP")]
    pub vwap: Option<f64>,
}

impl ExpectedRow {
    /// Expected value of channel `name`, NaN when undefined.
    #[allow(dead_code)]
    pub fn get(&self, name: &str) -> f64 {
        let value = match name {
            "SMA20" => self.sma20,
            "EMA13" => self.ema13,
            "BB_Upper" => self.bb_upper,
            "BB_Lower" => self.bb_lower,
            "RSI" => self.rsi,
            "MACD_Histo" => self.macd_histo,
            "Stoch_K" => self.stoch_k,
            "Stoch_D" => self.stoch_d,
            "ADX" => self.adx,
            "ADX_Plus_Di" => self.adx_plus_di,
            "VWAP" => self.vwap,
            other => panic!("no expected column {other}"),
        };
        value.unwrap_or(f64::NAN)
    }
}

/// Loads `tests/fixtures/expected.csv`.
#[allow(dead_code)]
pub fn load_expected() -> Vec<ExpectedRow> {
    let mut reader = csv::Reader::from_path(fixture_path("expected.csv")).unwrap();
    reader.deserialize().collect::<Result<_, _>>().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_nan() {
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
        assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
    }

    #[test]
    fn test_verify_nan_prefix() {
        let data = vec![f64::NAN, f64::NAN, 1.0, 2.0, 3.0];
        assert!(verify_nan_prefix(&data, 2));
        assert!(!verify_nan_prefix(&data, 3));
        assert_eq!(count_nans(&data), 2);
    }
}
