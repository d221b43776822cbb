//! Technical analysis indicators.
//!
//! All indicators share the following properties:
//!
//! - **Generic**: work with both `f32` and `f64` via
//!   [`SeriesElement`](crate::traits::SeriesElement)
//! - **Aligned**: output has exactly the input's length; position `i` of the
//!   output describes bar `i`
//! - **NaN-aware**: positions without enough history are NaN, and so is any
//!   window that contains a NaN input
//! - **Error-safe**: only parameter and shape problems are errors; an empty
//!   input or a window longer than the data produces empty or all-NaN output
//!
//! # Indicator Categories
//!
//! ## Moving averages
//! - [`sma()`] - Simple Moving Average
//! - [`ema()`] - Exponential Moving Average
//!
//! ## Bands
//! - [`bollinger()`] - Bollinger Bands
//!
//! ## Momentum
//! - [`macd()`] - Moving Average Convergence Divergence
//! - [`rsi()`] - Relative Strength Index
//!
//! ## Range
//! - [`stochastic()`] - Stochastic Oscillator
//! - [`adx()`] - Average Directional Index with +DI/-DI
//!
//! ## Volume
//! - [`vwap()`] - Volume Weighted Average Price
//!
//! # Example
//!
//! ```
//! use stock_ta::indicators::{ema, rsi, sma};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let sma_result = sma(&prices, 5).unwrap();
//! let ema_result = ema(&prices, 5).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! assert_eq!(sma_result.len(), prices.len());
//! assert!(!ema_result[0].is_nan());
//! assert!(rsi_result[4].is_nan());
//! ```

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vwap;

pub use adx::{adx, adx_lookback, di_lookback, true_range, Adx, AdxOutput};
pub use bollinger::{bollinger, bollinger_lookback, rolling_stddev, Bollinger, BollingerOutput};
pub use ema::{ema, ema_alpha, ema_into, ema_lookback, ema_with_alpha};
pub use macd::{macd, macd_lookback, Macd, MacdOutput};
pub use rsi::{rsi, rsi_lookback, Rsi};
pub use sma::{sma, sma_into, sma_lookback};
pub use stochastic::{
    stochastic, stochastic_d_lookback, stochastic_k_lookback, Stochastic, StochasticOutput,
};
pub use vwap::{vwap, vwap_lookback, vwap_series};

use crate::error::{Error, Result};
use crate::series::Column;
use crate::traits::validate_column_length;

/// Checks that an `_into` output buffer can hold `input` values.
pub(crate) const fn check_output_len(input: usize, output: usize) -> Result<()> {
    if output < input {
        Err(Error::InvalidParameter {
            name: "output",
            reason: "output buffer is shorter than the input",
        })
    } else {
        Ok(())
    }
}

/// Checks that every column has the length of the first one.
pub(crate) fn check_aligned<T>(columns: &[(Column, &[T])]) -> Result<()> {
    let Some(&(_, first)) = columns.first() else {
        return Ok(());
    };
    columns
        .iter()
        .try_for_each(|&(column, values)| validate_column_length(values, first.len(), column))
}
