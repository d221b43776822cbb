//! Commonly used types and functions for convenient importing.
//!
//! ```
//! use stock_ta::prelude::*;
//!
//! let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma_result = sma(&prices, 3).unwrap();
//! let ema_result = ema(&prices, 3).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! ```

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::SeriesElement;

// Price data
pub use crate::series::{Bar, Column, PriceSeries, Timestamp};

// Indicator functions
pub use crate::indicators::{adx, bollinger, ema, macd, rsi, sma, stochastic, vwap, vwap_series};

// Multi-output types
pub use crate::indicators::{AdxOutput, BollingerOutput, MacdOutput, StochasticOutput};

// Configuration types
pub use crate::indicators::{Adx, Bollinger, Macd, Rsi, Stochastic};

// Pipelines
pub use crate::batch::BatchProcessor;
pub use crate::pipeline::{
    ErrorPolicy, IndicatorFrame, IndicatorRequest, Pipeline, PipelineConfig, PipelineReport,
};
