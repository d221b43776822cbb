//! stock-ta: technical indicators over OHLCV price series
//!
//! This crate computes the indicators commonly charted next to stock prices
//! (moving averages, Bollinger Bands, MACD, RSI, Stochastic, ADX/DMI and VWAP)
//! and assembles them into named, timestamp-aligned outputs.
//!
//! # Features
//!
//! - **Aligned**: every output has the input's length; warm-up positions are NaN
//! - **Generics**: works with both `f32` and `f64` data types
//! - **Pipelines**: request indicators by name (`"EMA13"`, `"bb:20,2"`) and get
//!   back a frame of named channels
//! - **Batches**: run one pipeline over many series, in parallel with the
//!   `parallel` feature
//!
//! # Quick Start
//!
//! ```
//! use stock_ta::indicators::sma;
//!
//! let data = vec![10.0_f64, 11.0, 12.0, 11.0, 10.0];
//! let result = sma(&data, 3).unwrap();
//!
//! // First 2 values are NaN (warm-up)
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 11.0).abs() < 1e-10);
//! ```
//!
//! # Pipelines
//!
//! ```
//! use stock_ta::prelude::*;
//!
//! let series = PriceSeries::from_bars(&[
//!     Bar { timestamp: 1, open: 9.5, high: 10.5, low: 9.0, close: 10.0, volume: 100.0 },
//!     Bar { timestamp: 2, open: 10.0, high: 11.5, low: 9.8, close: 11.0, volume: 100.0 },
//!     Bar { timestamp: 3, open: 11.0, high: 12.2, low: 10.9, close: 12.0, volume: 100.0 },
//! ])
//! .unwrap();
//!
//! let report = Pipeline::parse(["EMA5", "VWAP"]).unwrap().run(&series).unwrap();
//! assert_eq!(report.frame.value_at("VWAP", 3), Some(11.0));
//! ```
//!
//! # Error Handling
//!
//! Only bad parameters and badly shaped input are errors. Data that is
//! merely too short yields NaN:
//!
//! ```
//! use stock_ta::indicators::sma;
//!
//! // Window longer than the data
//! let result = sma(&[1.0_f64, 2.0], 10).unwrap();
//! assert!(result.iter().all(|v| v.is_nan()));
//!
//! // Zero window
//! assert!(sma(&[1.0_f64, 2.0], 0).is_err());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod indicators;
pub mod kernels;
pub mod pipeline;
pub mod prelude;
pub mod series;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use pipeline::{IndicatorFrame, IndicatorRequest, Pipeline};
pub use series::{Bar, Column, PriceSeries, Timestamp};
pub use traits::SeriesElement;
pub use utils::{approx_eq, count_nan_prefix, EPSILON, LOOSE_EPSILON};
