//! Rolling extrema using a monotonic deque for O(n) rolling max/min.
//!
//! The deque holds indices whose values are monotonically ordered
//! (decreasing for max, increasing for min), so the front is always the
//! extremum of the current window. Each index is pushed and popped at most
//! once, giving amortized O(1) work per element.
//!
//! NaN follows the same rule as the rolling mean: a window that contains a
//! NaN has no extremum and reduces to NaN.
//!
//! # Example
//!
//! ```
//! use stock_ta::kernels::rolling_extrema::{rolling_max, rolling_min};
//!
//! let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
//!
//! let max_result = rolling_max(&data, 3).unwrap();
//! assert_eq!(max_result[2], 4.0); // max of [3, 1, 4]
//! assert_eq!(max_result[5], 9.0); // max of [1, 5, 9]
//!
//! let min_result = rolling_min(&data, 3).unwrap();
//! assert_eq!(min_result[2], 1.0); // min of [3, 1, 4]
//! assert_eq!(min_result[5], 1.0); // min of [1, 5, 9]
//! ```

use std::collections::VecDeque;

use crate::error::Result;
use crate::traits::{validate_period, SeriesElement};

/// Which extremum a [`MonotonicDeque`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Rolling maximum.
    Max,
    /// Rolling minimum.
    Min,
}

/// A monotonic deque tracking the extremum of a sliding window.
///
/// The deque stores indices into the caller's data array.
#[derive(Debug, Clone)]
pub struct MonotonicDeque {
    deque: VecDeque<usize>,
    window: usize,
    kind: Extremum,
    // NaN positions still inside the window
    nan_positions: VecDeque<usize>,
}

impl MonotonicDeque {
    /// Creates an empty deque for a window of `window` elements.
    #[must_use]
    pub fn new(window: usize, kind: Extremum) -> Self {
        Self {
            deque: VecDeque::with_capacity(window),
            window,
            kind,
            nan_positions: VecDeque::new(),
        }
    }

    /// Returns the window size.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Returns true if no index is tracked.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }

    /// Slides the window forward to include `data[index]`.
    ///
    /// Indices must be pushed in increasing order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `data`.
    #[inline]
    pub fn push<T: SeriesElement>(&mut self, index: usize, data: &[T]) {
        let value = data[index];

        if value.is_nan() {
            self.nan_positions.push_back(index);
        } else {
            // drop dominated candidates from the back
            while let Some(&back) = self.deque.back() {
                let dominated = match self.kind {
                    Extremum::Max => value >= data[back],
                    Extremum::Min => value <= data[back],
                };
                if !dominated {
                    break;
                }
                self.deque.pop_back();
            }
            self.deque.push_back(index);
        }

        self.remove_expired(index);
    }

    fn remove_expired(&mut self, current_index: usize) {
        if current_index + 1 < self.window {
            return;
        }
        let window_start = current_index + 1 - self.window;
        while self.deque.front().is_some_and(|&front| front < window_start) {
            self.deque.pop_front();
        }
        while self
            .nan_positions
            .front()
            .is_some_and(|&front| front < window_start)
        {
            self.nan_positions.pop_front();
        }
    }

    /// Index of the current extremum, `None` if the window holds a NaN or nothing.
    #[inline]
    #[must_use]
    pub fn front_index(&self) -> Option<usize> {
        if self.nan_positions.is_empty() {
            self.deque.front().copied()
        } else {
            None
        }
    }

    /// Current extremum value, NaN if there is none.
    #[inline]
    pub fn extremum<T: SeriesElement>(&self, data: &[T]) -> T {
        self.front_index().map_or_else(T::nan, |idx| data[idx])
    }
}

/// Rolling maximum and minimum of the same window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingExtremaOutput<T> {
    /// The rolling maximum values.
    pub max: Vec<T>,
    /// The rolling minimum values.
    pub min: Vec<T>,
}

/// Returns the lookback of a rolling extremum: `window - 1`.
#[inline]
#[must_use]
pub const fn rolling_extrema_lookback(window: usize) -> usize {
    window.saturating_sub(1)
}

fn rolling_extremum<T: SeriesElement>(data: &[T], window: usize, kind: Extremum) -> Result<Vec<T>> {
    validate_period(window, "window")?;

    let mut result = vec![T::nan(); data.len()];
    let mut deque = MonotonicDeque::new(window, kind);
    for i in 0..data.len() {
        deque.push(i, data);
        if i + 1 >= window {
            result[i] = deque.extremum(data);
        }
    }
    Ok(result)
}

/// Computes the rolling maximum over `window` elements.
///
/// Positions before `window - 1` and windows that contain NaN are NaN. A
/// window longer than the data yields an all-NaN result.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_max<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    rolling_extremum(data, window, Extremum::Max)
}

/// Computes the rolling minimum over `window` elements.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_min<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    rolling_extremum(data, window, Extremum::Min)
}

/// Computes the rolling maximum of `high` and the rolling minimum of `low`.
///
/// The two inputs are expected to have the same length.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `window` is zero.
pub fn rolling_extrema<T: SeriesElement>(
    high: &[T],
    low: &[T],
    window: usize,
) -> Result<RollingExtremaOutput<T>> {
    Ok(RollingExtremaOutput {
        max: rolling_max(high, window)?,
        min: rolling_min(low, window)?,
    })
}
