//! Columnar OHLCV price series.
//!
//! A [`PriceSeries`] is an immutable, time-ordered table of bars. Each of the
//! five price columns is optional, but a present column always has one value
//! per timestamp. Indicators read columns by [`Column`] and report
//! [`Error::MissingColumn`] when a column they need is absent.
//!
//! # Example
//!
//! ```
//! use stock_ta::series::{Column, PriceSeries};
//!
//! let series = PriceSeries::builder(vec![1, 2, 3])
//!     .close(vec![10.0_f64, 11.0, 12.0])
//!     .volume(vec![100.0, 200.0, 300.0])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(series.len(), 3);
//! assert_eq!(series.position_of(2), Some(1));
//! assert!(series.column(Column::Close, "VWAP").is_ok());
//! assert!(series.column(Column::High, "ADX").is_err());
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::{validate_column_length, SeriesElement};

/// Opaque, ordered bar timestamp (for example epoch seconds).
pub type Timestamp = i64;

/// One of the five price columns of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Column {
    /// Opening price.
    Open,
    /// Highest traded price.
    High,
    /// Lowest traded price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Column {
    /// Every column, in storage order.
    pub const ALL: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// The four price columns validated by the range indicators.
    pub const OHLC: [Self; 4] = [Self::Open, Self::High, Self::Low, Self::Close];

    /// Column name as it appears in price tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single OHLCV bar.
///
/// The invariant `high >= max(open, close) >= min(open, close) >= low` is
/// expected from the data source but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bar<T = f64> {
    /// Bar timestamp.
    pub timestamp: Timestamp,
    /// Opening price.
    pub open: T,
    /// Highest price.
    pub high: T,
    /// Lowest price.
    pub low: T,
    /// Closing price.
    pub close: T,
    /// Traded volume.
    pub volume: T,
}

/// Borrowed view of the four price columns.
#[derive(Debug, Clone, Copy)]
pub struct Ohlc<'a, T> {
    /// Opening prices.
    pub open: &'a [T],
    /// High prices.
    pub high: &'a [T],
    /// Low prices.
    pub low: &'a [T],
    /// Closing prices.
    pub close: &'a [T],
}

/// An immutable, time-ordered OHLCV table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSeries<T = f64> {
    timestamps: Vec<Timestamp>,
    columns: [Option<Vec<T>>; 5],
}

impl<T: SeriesElement> PriceSeries<T> {
    /// Starts building a series over the given timestamps.
    #[must_use]
    pub fn builder(timestamps: Vec<Timestamp>) -> PriceSeriesBuilder<T> {
        PriceSeriesBuilder {
            timestamps,
            columns: [None, None, None, None, None],
        }
    }

    /// Builds a series with all five columns from a slice of bars.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnorderedTimestamps` if the bars are not in strictly
    /// increasing timestamp order.
    pub fn from_bars(bars: &[Bar<T>]) -> Result<Self> {
        let n = bars.len();
        let mut timestamps = Vec::with_capacity(n);
        let mut open = Vec::with_capacity(n);
        let mut high = Vec::with_capacity(n);
        let mut low = Vec::with_capacity(n);
        let mut close = Vec::with_capacity(n);
        let mut volume = Vec::with_capacity(n);

        for bar in bars {
            timestamps.push(bar.timestamp);
            open.push(bar.open);
            high.push(bar.high);
            low.push(bar.low);
            close.push(bar.close);
            volume.push(bar.volume);
        }

        Self::builder(timestamps)
            .open(open)
            .high(high)
            .low(low)
            .close(close)
            .volume(volume)
            .build()
    }

    /// Number of bars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the series has no bars.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Bar timestamps in increasing order.
    #[inline]
    #[must_use]
    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Returns `true` if the series carries `column`.
    #[inline]
    #[must_use]
    pub const fn has_column(&self, column: Column) -> bool {
        self.columns[column.index()].is_some()
    }

    /// Borrows a column if present.
    #[inline]
    #[must_use]
    pub fn get(&self, column: Column) -> Option<&[T]> {
        self.columns[column.index()].as_deref()
    }

    /// Borrows a column on behalf of `indicator`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingColumn` if the column is absent.
    pub fn column(&self, column: Column, indicator: &'static str) -> Result<&[T]> {
        self.get(column)
            .ok_or(Error::MissingColumn { column, indicator })
    }

    /// Checks that every column in `columns` is present.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingColumn` for the first absent column.
    pub fn require(&self, columns: &[Column], indicator: &'static str) -> Result<()> {
        columns
            .iter()
            .try_for_each(|&column| self.column(column, indicator).map(|_| ()))
    }

    /// Borrows the four price columns, failing if any of them is absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingColumn` naming the first absent column.
    pub fn require_ohlc(&self, indicator: &'static str) -> Result<Ohlc<'_, T>> {
        Ok(Ohlc {
            open: self.column(Column::Open, indicator)?,
            high: self.column(Column::High, indicator)?,
            low: self.column(Column::Low, indicator)?,
            close: self.column(Column::Close, indicator)?,
        })
    }

    /// Position of the bar stamped `timestamp`, if present.
    #[must_use]
    pub fn position_of(&self, timestamp: Timestamp) -> Option<usize> {
        self.timestamps.binary_search(&timestamp).ok()
    }

    /// The bar at `position`; absent columns read as NaN.
    #[must_use]
    pub fn bar(&self, position: usize) -> Option<Bar<T>> {
        let timestamp = *self.timestamps.get(position)?;
        let value = |column: Column| {
            self.get(column)
                .and_then(|values| values.get(position).copied())
                .unwrap_or_else(T::nan)
        };
        Some(Bar {
            timestamp,
            open: value(Column::Open),
            high: value(Column::High),
            low: value(Column::Low),
            close: value(Column::Close),
            volume: value(Column::Volume),
        })
    }
}

/// Builder for [`PriceSeries`].
#[derive(Debug, Clone)]
#[must_use]
pub struct PriceSeriesBuilder<T> {
    timestamps: Vec<Timestamp>,
    columns: [Option<Vec<T>>; 5],
}

impl<T: SeriesElement> PriceSeriesBuilder<T> {
    /// Sets a column.
    pub fn column(mut self, column: Column, values: Vec<T>) -> Self {
        self.columns[column.index()] = Some(values);
        self
    }

    /// Sets the Open column.
    pub fn open(self, values: Vec<T>) -> Self {
        self.column(Column::Open, values)
    }

    /// Sets the High column.
    pub fn high(self, values: Vec<T>) -> Self {
        self.column(Column::High, values)
    }

    /// Sets the Low column.
    pub fn low(self, values: Vec<T>) -> Self {
        self.column(Column::Low, values)
    }

    /// Sets the Close column.
    pub fn close(self, values: Vec<T>) -> Self {
        self.column(Column::Close, values)
    }

    /// Sets the Volume column.
    pub fn volume(self, values: Vec<T>) -> Self {
        self.column(Column::Volume, values)
    }

    /// Validates and freezes the series.
    ///
    /// # Errors
    ///
    /// - `Error::UnorderedTimestamps` if timestamps are not strictly increasing
    /// - `Error::LengthMismatch` if a column length differs from the number of timestamps
    pub fn build(self) -> Result<PriceSeries<T>> {
        if let Some(position) = self
            .timestamps
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
        {
            return Err(Error::UnorderedTimestamps {
                position: position + 1,
            });
        }

        let expected = self.timestamps.len();
        for column in Column::ALL {
            if let Some(values) = &self.columns[column.index()] {
                validate_column_length(values, expected, column)?;
            }
        }

        Ok(PriceSeries {
            timestamps: self.timestamps,
            columns: self.columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> Vec<Bar<f64>> {
        (0..4)
            .map(|i| {
                let base = 10.0 + i as f64;
                Bar {
                    timestamp: 100 + i64::from(i) * 60,
                    open: base,
                    high: base + 1.0,
                    low: base - 1.0,
                    close: base + 0.5,
                    volume: 1_000.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_from_bars_fills_all_columns() {
        let series = PriceSeries::from_bars(&bars()).unwrap();
        assert_eq!(series.len(), 4);
        for column in Column::ALL {
            assert!(series.has_column(column));
        }
        assert_eq!(series.get(Column::Close).unwrap()[2], 12.5);
        assert_eq!(series.timestamps(), &[100, 160, 220, 280]);
    }

    #[test]
    fn test_bar_round_trips_position() {
        let input = bars();
        let series = PriceSeries::from_bars(&input).unwrap();
        assert_eq!(series.bar(1), Some(input[1]));
        assert_eq!(series.bar(4), None);
    }

    #[test]
    fn test_position_of() {
        let series = PriceSeries::from_bars(&bars()).unwrap();
        assert_eq!(series.position_of(220), Some(2));
        assert_eq!(series.position_of(221), None);
    }

    #[test]
    fn test_missing_column() {
        let series = PriceSeries::builder(vec![1, 2])
            .close(vec![1.0_f64, 2.0])
            .build()
            .unwrap();
        assert_eq!(
            series.column(Column::Volume, "VWAP"),
            Err(Error::MissingColumn {
                column: Column::Volume,
                indicator: "VWAP",
            })
        );
        assert!(series.bar(0).unwrap().open.is_nan());
    }

    #[test]
    fn test_require_ohlc_names_first_missing_column() {
        let series = PriceSeries::builder(vec![1, 2])
            .high(vec![2.0_f64, 3.0])
            .low(vec![1.0, 2.0])
            .close(vec![1.5, 2.5])
            .build()
            .unwrap();
        let err = series.require_ohlc("Stochastic").unwrap_err();
        assert_eq!(
            err,
            Error::MissingColumn {
                column: Column::Open,
                indicator: "Stochastic",
            }
        );
        assert!(series
            .require(&[Column::High, Column::Low], "test")
            .is_ok());
    }

    #[test]
    fn test_unordered_timestamps_rejected() {
        let err = PriceSeries::<f64>::builder(vec![1, 3, 3, 4]).build().unwrap_err();
        assert_eq!(err, Error::UnorderedTimestamps { position: 2 });

        let err = PriceSeries::<f64>::builder(vec![5, 4]).build().unwrap_err();
        assert_eq!(err, Error::UnorderedTimestamps { position: 1 });
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = PriceSeries::builder(vec![1, 2, 3])
            .close(vec![1.0_f64, 2.0, 3.0])
            .volume(vec![1.0, 2.0])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                column: Column::Volume,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::<f32>::builder(Vec::new())
            .close(Vec::new())
            .build()
            .unwrap();
        assert!(series.is_empty());
        assert_eq!(series.bar(0), None);
    }

    #[test]
    fn test_column_display() {
        assert_eq!(Column::High.to_string(), "High");
        assert_eq!(Column::OHLC.len(), 4);
    }
}
