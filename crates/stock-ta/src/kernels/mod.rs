//! Sliding-window kernels shared by the indicators.
//!
//! # Kernels
//!
//! - [`rolling`]: compensated rolling mean and variance
//! - [`rolling_extrema`]: monotonic deque algorithm for O(n) rolling max/min

pub mod rolling;
pub mod rolling_extrema;

pub use rolling::{rolling_mean, rolling_std, rolling_var, RollingMean, RollingVariance, WindowAccumulator};
pub use rolling_extrema::{
    rolling_extrema, rolling_extrema_lookback, rolling_max, rolling_min, Extremum, MonotonicDeque,
    RollingExtremaOutput,
};
