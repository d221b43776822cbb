//! Runs a list of indicator requests over one price series.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::PriceSeries;
use crate::traits::SeriesElement;
use crate::utils::count_defined;

use super::output::{IndicatorFrame, IndicatorOutput};
use super::request::IndicatorRequest;

/// What a pipeline run does when one indicator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ErrorPolicy {
    /// Validate every request up front and abort on the first error.
    #[default]
    FailFast,
    /// Compute what can be computed and report the rest as failures.
    Collect,
}

/// Serializable pipeline definition.
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use stock_ta::pipeline::{ErrorPolicy, PipelineConfig};
///
/// let config: PipelineConfig = serde_json::from_str(
///     r#"{ "indicators": ["ema:5", "EMA13", "bb", "rsi"], "error_policy": "collect" }"#,
/// ).unwrap();
/// assert_eq!(config.indicators.len(), 4);
/// assert_eq!(config.error_policy, ErrorPolicy::Collect);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PipelineConfig {
    /// Requests in output order.
    pub indicators: Vec<IndicatorRequest>,
    /// Failure handling.
    pub error_policy: ErrorPolicy,
}

/// An indicator that could not be computed under [`ErrorPolicy::Collect`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFailure {
    /// The failing request.
    pub request: IndicatorRequest,
    /// Why it failed.
    pub error: Error,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport<T> {
    /// Every channel that was computed.
    pub frame: IndicatorFrame<T>,
    /// Requests that failed; always empty under [`ErrorPolicy::FailFast`].
    pub failures: Vec<IndicatorFailure>,
}

impl<T> PipelineReport<T> {
    /// Returns `true` if every request produced output.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// An ordered, duplicate-free list of indicator requests.
///
/// # Example
///
/// ```
/// use stock_ta::pipeline::{IndicatorRequest, Pipeline};
/// use stock_ta::series::PriceSeries;
///
/// let series = PriceSeries::builder(vec![1, 2, 3])
///     .close(vec![10.0_f64, 11.0, 12.0])
///     .volume(vec![100.0, 100.0, 100.0])
///     .build()
///     .unwrap();
///
/// let report = Pipeline::new()
///     .with(IndicatorRequest::Ema { span: 2 })
///     .with(IndicatorRequest::Vwap)
///     .run(&series)
///     .unwrap();
///
/// assert_eq!(report.frame.get("VWAP").unwrap(), &[10.0, 10.5, 11.0]);
/// assert_eq!(report.frame.value_at("EMA2", 1), Some(10.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Pipeline {
    requests: Vec<IndicatorRequest>,
    policy: ErrorPolicy,
}

impl Pipeline {
    /// Creates an empty fail-fast pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `request` unless an equal request is already present.
    pub fn with(mut self, request: impl Into<IndicatorRequest>) -> Self {
        let request = request.into();
        if !self.requests.contains(&request) {
            self.requests.push(request);
        }
        self
    }

    /// Appends every request in order, skipping duplicates.
    pub fn with_all<I>(self, requests: I) -> Self
    where
        I: IntoIterator<Item = IndicatorRequest>,
    {
        requests.into_iter().fold(self, |pipeline, request| pipeline.with(request))
    }

    /// Sets the failure policy. Default: [`ErrorPolicy::FailFast`]
    pub const fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds a pipeline from a configuration.
    pub fn from_config(config: PipelineConfig) -> Self {
        Self::new()
            .error_policy(config.error_policy)
            .with_all(config.indicators)
    }

    /// Parses every name into a request.
    ///
    /// # Errors
    ///
    /// The first `Error::UnknownIndicator` or `Error::MalformedRequest`.
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_fold(Self::new(), |pipeline, name| {
                Ok(pipeline.with(name.as_ref().parse::<IndicatorRequest>()?))
            })
    }

    /// The requests in output order.
    #[must_use]
    pub fn requests(&self) -> &[IndicatorRequest] {
        &self.requests
    }

    /// The configured failure policy.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// The configuration this pipeline was built from.
    #[must_use]
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            indicators: self.requests.clone(),
            error_policy: self.policy,
        }
    }

    /// Computes every request over `series`.
    ///
    /// Channels appear in the frame in request order. Requests are computed
    /// independently, in parallel when the `parallel` feature is enabled.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::FailFast`], the first parameter or column error of
    /// any request, detected before anything is computed. Under
    /// [`ErrorPolicy::Collect`] this never fails; failures are listed in the
    /// report instead.
    pub fn run<T: SeriesElement>(&self, series: &PriceSeries<T>) -> Result<PipelineReport<T>> {
        let _span = tracing::debug_span!(
            "pipeline_run",
            bars = series.len(),
            indicators = self.requests.len(),
            policy = ?self.policy
        )
        .entered();

        if self.policy == ErrorPolicy::FailFast {
            for request in &self.requests {
                request.validate_for(series)?;
            }
        }

        let results = self.compute_all(series);

        let mut frame = IndicatorFrame::new(series.timestamps().to_vec());
        let mut failures = Vec::new();
        for (&request, result) in self.requests.iter().zip(results) {
            match result {
                Ok(output) => {
                    tracing::debug!(
                        indicator = %request,
                        channels = output.len(),
                        defined = output.channels().map(|c| count_defined(c.values())).sum::<usize>(),
                        "indicator computed"
                    );
                    let duplicates = frame.insert(output);
                    if !duplicates.is_empty() {
                        tracing::warn!(indicator = %request, ?duplicates, "duplicate channel names ignored");
                    }
                }
                Err(error) if self.policy == ErrorPolicy::FailFast => return Err(error),
                Err(error) => {
                    tracing::warn!(indicator = %request, %error, "indicator failed");
                    failures.push(IndicatorFailure { request, error });
                }
            }
        }

        tracing::debug!(
            channels = frame.channel_count(),
            failures = failures.len(),
            "pipeline finished"
        );
        Ok(PipelineReport { frame, failures })
    }

    #[cfg(feature = "parallel")]
    fn compute_all<T: SeriesElement>(
        &self,
        series: &PriceSeries<T>,
    ) -> Vec<Result<IndicatorOutput<T>>> {
        self.requests
            .par_iter()
            .map(|request| request.compute(series))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_all<T: SeriesElement>(
        &self,
        series: &PriceSeries<T>,
    ) -> Vec<Result<IndicatorOutput<T>>> {
        self.requests
            .iter()
            .map(|request| request.compute(series))
            .collect()
    }
}

impl FromIterator<IndicatorRequest> for Pipeline {
    fn from_iter<I: IntoIterator<Item = IndicatorRequest>>(iter: I) -> Self {
        Self::new().with_all(iter)
    }
}

impl From<PipelineConfig> for Pipeline {
    fn from(config: PipelineConfig) -> Self {
        Self::from_config(config)
    }
}
