//! Multi-indicator pipelines.
//!
//! A [`Pipeline`] holds an ordered list of [`IndicatorRequest`]s and runs them
//! over a [`PriceSeries`](crate::series::PriceSeries), producing an
//! [`IndicatorFrame`] of named channels aligned with the input timestamps.
//!
//! ```
//! use stock_ta::pipeline::Pipeline;
//! use stock_ta::series::PriceSeries;
//!
//! let n = 40;
//! let close: Vec<f64> = (0..n).map(|i| 50.0 + (i as f64 * 0.4).sin()).collect();
//! let series = PriceSeries::builder((0..n as i64).collect())
//!     .close(close)
//!     .build()
//!     .unwrap();
//!
//! let report = Pipeline::parse(["EMA5", "EMA13", "rsi", "macd"])
//!     .unwrap()
//!     .run(&series)
//!     .unwrap();
//!
//! assert!(report.frame.contains("MACD_Histo"));
//! assert!(report.frame.value_at("RSI", 20).unwrap() <= 100.0);
//! ```

mod executor;
mod output;
mod request;

pub use executor::{ErrorPolicy, IndicatorFailure, Pipeline, PipelineConfig, PipelineReport};
pub use output::{Channel, IndicatorFrame, IndicatorOutput};
pub use request::{IndicatorRequest, DEFAULT_EMA_SPAN, DEFAULT_SMA_WINDOW};
