//! Batch processing over many price series.
//!
//! A typical batch is one symbol at several timeframes (monthly, weekly,
//! daily) or one timeframe across many symbols. Each series is independent,
//! so with the `parallel` feature enabled large batches are spread over the
//! Rayon thread pool.
//!
//! ```toml
//! [dependencies]
//! stock-ta = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use stock_ta::batch::BatchProcessor;
//! use stock_ta::pipeline::Pipeline;
//! use stock_ta::series::PriceSeries;
//!
//! let daily = PriceSeries::builder(vec![1, 2, 3, 4])
//!     .close(vec![10.0_f64, 11.0, 12.0, 13.0])
//!     .build()
//!     .unwrap();
//! let weekly = PriceSeries::builder(vec![1, 8])
//!     .close(vec![10.0_f64, 13.0])
//!     .build()
//!     .unwrap();
//!
//! let pipeline = Pipeline::parse(["ema:3", "sma:2"]).unwrap();
//! let reports = BatchProcessor::new()
//!     .run_labeled(&pipeline, &[("daily", daily), ("weekly", weekly)])
//!     .unwrap();
//!
//! assert_eq!(reports[0].0, "daily");
//! assert_eq!(reports[1].1.frame.get("SMA2").unwrap()[1], 11.5);
//! ```

use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::series::PriceSeries;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs work over a batch of price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct BatchProcessor {
    /// Minimum number of series before work is spread across threads.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a processor with default settings.
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: 8,
        }
    }

    /// Sets the minimum number of series required for parallel processing.
    /// Default: 8
    ///
    /// Smaller batches run sequentially. Has no effect without the `parallel`
    /// feature.
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Applies `f` to every series, returning results in input order.
    ///
    /// # Errors
    ///
    /// The first error returned by `f`.
    #[cfg(feature = "parallel")]
    pub fn process<T, F, R>(&self, series: &[PriceSeries<T>], f: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&PriceSeries<T>) -> Result<R> + Send + Sync,
        R: Send,
    {
        if series.len() < self.min_parallel_threshold {
            series.iter().map(f).collect()
        } else {
            tracing::debug!(series = series.len(), "processing batch in parallel");
            series.par_iter().map(f).collect()
        }
    }

    /// Applies `f` to every series, returning results in input order.
    ///
    /// # Errors
    ///
    /// The first error returned by `f`.
    #[cfg(not(feature = "parallel"))]
    pub fn process<T, F, R>(&self, series: &[PriceSeries<T>], f: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&PriceSeries<T>) -> Result<R>,
    {
        series.iter().map(f).collect()
    }

    /// Runs `pipeline` over every series.
    ///
    /// # Errors
    ///
    /// The first error of any run; see [`Pipeline::run`].
    pub fn run_pipeline<T: SeriesElement>(
        &self,
        pipeline: &Pipeline,
        series: &[PriceSeries<T>],
    ) -> Result<Vec<PipelineReport<T>>> {
        self.process(series, |s| pipeline.run(s))
    }

    /// Runs `pipeline` over labelled series, keeping each label with its
    /// report.
    ///
    /// # Errors
    ///
    /// The first error of any run; see [`Pipeline::run`].
    #[cfg(feature = "parallel")]
    pub fn run_labeled<K, T>(
        &self,
        pipeline: &Pipeline,
        series: &[(K, PriceSeries<T>)],
    ) -> Result<Vec<(K, PipelineReport<T>)>>
    where
        K: Clone + Send + Sync,
        T: SeriesElement,
    {
        let run = |(label, s): &(K, PriceSeries<T>)| -> Result<(K, PipelineReport<T>)> {
            Ok((label.clone(), pipeline.run(s)?))
        };
        if series.len() < self.min_parallel_threshold {
            series.iter().map(run).collect()
        } else {
            series.par_iter().map(run).collect()
        }
    }

    /// Runs `pipeline` over labelled series, keeping each label with its
    /// report.
    ///
    /// # Errors
    ///
    /// The first error of any run; see [`Pipeline::run`].
    #[cfg(not(feature = "parallel"))]
    pub fn run_labeled<K, T>(
        &self,
        pipeline: &Pipeline,
        series: &[(K, PriceSeries<T>)],
    ) -> Result<Vec<(K, PipelineReport<T>)>>
    where
        K: Clone,
        T: SeriesElement,
    {
        series
            .iter()
            .map(|(label, s)| -> Result<(K, PipelineReport<T>)> {
                Ok((label.clone(), pipeline.run(s)?))
            })
            .collect()
    }
}
