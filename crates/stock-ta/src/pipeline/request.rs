//! Indicator requests and their canonical names.
//!
//! A request names one indicator with its parameters. Requests can be built
//! directly, from the indicator config types, or parsed from strings:
//!
//! | Input                         | Request                               |
//! |-------------------------------|---------------------------------------|
//! | `"ema:5"`, `"EMA5"`           | `Ema { span: 5 }`                     |
//! | `"sma"`                       | `Sma { window: 50 }`                  |
//! | `"bollinger:20,2"`, `"bb"`    | `Bollinger(Bollinger::default())`     |
//! | `"macd:5,35,5"`               | `Macd(..)`                            |
//! | `"rsi"`, `"RSI9"`             | `Rsi(..)`                             |
//! | `"stoch:14,3"`                | `Stochastic(..)`                      |
//! | `"adx"`, `"dmi:7"`            | `Adx(..)`                             |
//! | `"vwap"`                      | `Vwap`                                |
//!
//! Names are case-insensitive and ignore spaces, `_` and `-`, so the labels
//! shown to users (`"Bollinger Bands"`) parse as well. Missing trailing
//! parameters take their defaults.
//!
//! # Output channel names
//!
//! Moving averages always carry their parameter (`EMA5`, `SMA50`). Other
//! indicators use their bare channel names at default parameters (`RSI`,
//! `BB_Upper`, `ADX_Plus_Di`) and append their parameters otherwise: a single
//! parameter directly (`RSI9`, `ADX_Minus_Di7`), several joined with `_`
//! (`BB_Upper_10_2.5`, `MACD_Signal_5_35_5`).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indicators::{
    adx_lookback, bollinger_lookback, di_lookback, ema, rsi_lookback, sma, sma_lookback,
    stochastic_d_lookback, stochastic_k_lookback, vwap_series, Adx, Bollinger, Macd, Rsi,
    Stochastic,
};
use crate::series::{Column, PriceSeries};
use crate::traits::{validate_period, SeriesElement};

use super::output::IndicatorOutput;

/// Default SMA window.
pub const DEFAULT_SMA_WINDOW: usize = 50;
/// Default EMA span.
pub const DEFAULT_EMA_SPAN: usize = 5;

const CLOSE: &[Column] = &[Column::Close];
const CLOSE_VOLUME: &[Column] = &[Column::Close, Column::Volume];
const OHLC: &[Column] = &Column::OHLC;

/// One indicator with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum IndicatorRequest {
    /// Simple moving average of the close.
    Sma {
        /// Averaging window.
        window: usize,
    },
    /// Exponential moving average of the close.
    Ema {
        /// EMA span.
        span: usize,
    },
    /// Bollinger Bands of the close.
    Bollinger(Bollinger),
    /// MACD of the close.
    Macd(Macd),
    /// RSI of the close.
    Rsi(Rsi),
    /// Stochastic Oscillator.
    Stochastic(Stochastic),
    /// ADX with +DI/-DI.
    Adx(Adx),
    /// Anchored VWAP of the close.
    Vwap,
}

impl IndicatorRequest {
    /// Indicator name used in logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sma { .. } => "SMA",
            Self::Ema { .. } => "EMA",
            Self::Bollinger(_) => "Bollinger",
            Self::Macd(_) => "MACD",
            Self::Rsi(_) => "RSI",
            Self::Stochastic(_) => "Stochastic",
            Self::Adx(_) => "ADX",
            Self::Vwap => "VWAP",
        }
    }

    /// Price columns the indicator reads or requires.
    #[must_use]
    pub const fn required_columns(&self) -> &'static [Column] {
        match self {
            Self::Sma { .. } | Self::Ema { .. } | Self::Bollinger(_) | Self::Macd(_) | Self::Rsi(_) => {
                CLOSE
            }
            Self::Stochastic(_) | Self::Adx(_) => OHLC,
            Self::Vwap => CLOSE_VOLUME,
        }
    }

    /// Names of the output channels, in output order.
    #[must_use]
    pub fn channel_names(&self) -> Vec<String> {
        match *self {
            Self::Sma { window } => vec![format!("SMA{window}")],
            Self::Ema { span } => vec![format!("EMA{span}")],
            Self::Bollinger(c) => {
                let suffix = if c == Bollinger::default() {
                    String::new()
                } else {
                    format!("_{}_{}", c.get_window(), c.get_num_std())
                };
                ["BB_SMA", "BB_Upper", "BB_Lower"]
                    .iter()
                    .map(|base| format!("{base}{suffix}"))
                    .collect()
            }
            Self::Macd(c) => {
                let suffix = if c == Macd::default() {
                    String::new()
                } else {
                    format!("_{}_{}_{}", c.get_fast(), c.get_slow(), c.get_signal())
                };
                ["MACD", "MACD_Signal", "MACD_Histo"]
                    .iter()
                    .map(|base| format!("{base}{suffix}"))
                    .collect()
            }
            Self::Rsi(c) => {
                if c == Rsi::default() {
                    vec!["RSI".to_string()]
                } else {
                    vec![format!("RSI{}", c.get_period())]
                }
            }
            Self::Stochastic(c) => {
                let suffix = if c == Stochastic::default() {
                    String::new()
                } else {
                    format!("_{}_{}", c.get_k_window(), c.get_d_window())
                };
                vec![format!("Stoch_K{suffix}"), format!("Stoch_D{suffix}")]
            }
            Self::Adx(c) => {
                let suffix = if c == Adx::default() {
                    String::new()
                } else {
                    c.get_period().to_string()
                };
                ["ADX", "ADX_Plus_Di", "ADX_Minus_Di"]
                    .iter()
                    .map(|base| format!("{base}{suffix}"))
                    .collect()
            }
            Self::Vwap => vec!["VWAP".to_string()],
        }
    }

    /// Warm-up length of each output channel, aligned with [`channel_names`](Self::channel_names).
    #[must_use]
    pub fn lookbacks(&self) -> Vec<usize> {
        match *self {
            Self::Sma { window } => vec![sma_lookback(window)],
            Self::Ema { .. } | Self::Vwap => vec![0],
            Self::Bollinger(c) => vec![bollinger_lookback(c.get_window()); 3],
            Self::Macd(_) => vec![0; 3],
            Self::Rsi(c) => vec![rsi_lookback(c.get_period())],
            Self::Stochastic(c) => vec![
                stochastic_k_lookback(c.get_k_window()),
                stochastic_d_lookback(c.get_k_window(), c.get_d_window()),
            ],
            Self::Adx(c) => {
                let p = c.get_period();
                vec![adx_lookback(p), di_lookback(p), di_lookback(p)]
            }
        }
    }

    /// Checks the parameters without looking at any data.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPeriod` for a zero window, span or period
    /// - `Error::InvalidParameter` for a negative or non-finite Bollinger width
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Sma { window } => validate_period(window, "window"),
            Self::Ema { span } => validate_period(span, "span"),
            Self::Bollinger(c) => {
                validate_period(c.get_window(), "window")?;
                let num_std = c.get_num_std();
                if num_std.is_finite() && num_std >= 0.0 {
                    Ok(())
                } else {
                    Err(Error::InvalidParameter {
                        name: "num_std",
                        reason: "must be finite and non-negative",
                    })
                }
            }
            Self::Macd(c) => {
                validate_period(c.get_fast(), "span")?;
                validate_period(c.get_slow(), "span")?;
                validate_period(c.get_signal(), "span")
            }
            Self::Rsi(c) => validate_period(c.get_period(), "period"),
            Self::Stochastic(c) => {
                validate_period(c.get_k_window(), "window")?;
                validate_period(c.get_d_window(), "window")
            }
            Self::Adx(c) => validate_period(c.get_period(), "period"),
            Self::Vwap => Ok(()),
        }
    }

    /// Checks the parameters and that `series` has every required column.
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) reports, plus
    /// `Error::MissingColumn`.
    pub fn validate_for<T: SeriesElement>(&self, series: &PriceSeries<T>) -> Result<()> {
        self.validate()?;
        series.require(self.required_columns(), self.name())
    }

    /// Computes the indicator over `series`.
    ///
    /// # Errors
    ///
    /// Any parameter or column error of the underlying indicator.
    pub fn compute<T: SeriesElement>(&self, series: &PriceSeries<T>) -> Result<IndicatorOutput<T>> {
        let values = match *self {
            Self::Sma { window } => vec![sma(series.column(Column::Close, self.name())?, window)?],
            Self::Ema { span } => vec![ema(series.column(Column::Close, self.name())?, span)?],
            Self::Bollinger(c) => {
                let out = c.compute(series.column(Column::Close, self.name())?)?;
                vec![out.middle, out.upper, out.lower]
            }
            Self::Macd(c) => {
                let out = c.compute(series.column(Column::Close, self.name())?)?;
                vec![out.macd_line, out.signal_line, out.histogram]
            }
            Self::Rsi(c) => vec![c.compute(series.column(Column::Close, self.name())?)?],
            Self::Stochastic(c) => {
                let out = c.compute_series(series)?;
                vec![out.k, out.d]
            }
            Self::Adx(c) => {
                let out = c.compute_series(series)?;
                vec![out.adx, out.plus_di, out.minus_di]
            }
            Self::Vwap => vec![vwap_series(series)?],
        };
        Ok(IndicatorOutput::new(self.channel_names().into_iter().zip(values)))
    }
}

impl From<Bollinger> for IndicatorRequest {
    fn from(config: Bollinger) -> Self {
        Self::Bollinger(config)
    }
}

impl From<Macd> for IndicatorRequest {
    fn from(config: Macd) -> Self {
        Self::Macd(config)
    }
}

impl From<Rsi> for IndicatorRequest {
    fn from(config: Rsi) -> Self {
        Self::Rsi(config)
    }
}

impl From<Stochastic> for IndicatorRequest {
    fn from(config: Stochastic) -> Self {
        Self::Stochastic(config)
    }
}

impl From<Adx> for IndicatorRequest {
    fn from(config: Adx) -> Self {
        Self::Adx(config)
    }
}

impl fmt::Display for IndicatorRequest {
    /// Canonical, re-parseable form, e.g. `bollinger:20,2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sma { window } => write!(f, "sma:{window}"),
            Self::Ema { span } => write!(f, "ema:{span}"),
            Self::Bollinger(c) => write!(f, "bollinger:{},{}", c.get_window(), c.get_num_std()),
            Self::Macd(c) => write!(f, "macd:{},{},{}", c.get_fast(), c.get_slow(), c.get_signal()),
            Self::Rsi(c) => write!(f, "rsi:{}", c.get_period()),
            Self::Stochastic(c) => write!(f, "stochastic:{},{}", c.get_k_window(), c.get_d_window()),
            Self::Adx(c) => write!(f, "adx:{}", c.get_period()),
            Self::Vwap => f.write_str("vwap"),
        }
    }
}

/// Parameter list of a request being parsed.
struct Params<'a> {
    request: &'a str,
    values: Vec<&'a str>,
}

impl Params<'_> {
    fn malformed(&self, reason: &'static str) -> Error {
        Error::MalformedRequest {
            request: self.request.to_string(),
            reason,
        }
    }

    fn at_most(&self, count: usize) -> Result<()> {
        if self.values.len() > count {
            Err(self.malformed("too many parameters"))
        } else {
            Ok(())
        }
    }

    fn get<P: FromStr>(&self, index: usize, default: P) -> Result<P> {
        self.values.get(index).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|_| self.malformed("parameters must be numbers"))
        })
    }
}

impl FromStr for IndicatorRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let (head, listed) = match raw.split_once(':') {
            Some((head, list)) => (head, Some(list)),
            None => (raw, None),
        };

        let normalized: String = head
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let name_len = normalized
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .len();
        let (name, glued) = normalized.split_at(name_len);

        let values = match (listed, glued.is_empty()) {
            (Some(_), false) => {
                return Err(Error::MalformedRequest {
                    request: raw.to_string(),
                    reason: "parameters given both inline and after `:`",
                })
            }
            (Some(list), true) => list.split(',').collect(),
            (None, false) => vec![glued],
            (None, true) => Vec::new(),
        };
        let params = Params {
            request: raw,
            values,
        };

        let request = match name {
            "sma" | "simplemovingaverage" => {
                params.at_most(1)?;
                Self::Sma {
                    window: params.get(0, DEFAULT_SMA_WINDOW)?,
                }
            }
            "ema" | "exponentialmovingaverage" => {
                params.at_most(1)?;
                Self::Ema {
                    span: params.get(0, DEFAULT_EMA_SPAN)?,
                }
            }
            "bollinger" | "bollingerbands" | "bb" | "bbands" => {
                params.at_most(2)?;
                let defaults = Bollinger::default();
                Self::Bollinger(
                    Bollinger::new()
                        .window(params.get(0, defaults.get_window())?)
                        .num_std(params.get(1, defaults.get_num_std())?),
                )
            }
            "macd" => {
                params.at_most(3)?;
                let defaults = Macd::default();
                Self::Macd(
                    Macd::new()
                        .fast(params.get(0, defaults.get_fast())?)
                        .slow(params.get(1, defaults.get_slow())?)
                        .signal(params.get(2, defaults.get_signal())?),
                )
            }
            "rsi" => {
                params.at_most(1)?;
                Self::Rsi(Rsi::new().period(params.get(0, Rsi::default().get_period())?))
            }
            "stochastic" | "stoch" => {
                params.at_most(2)?;
                let defaults = Stochastic::default();
                Self::Stochastic(
                    Stochastic::new()
                        .k_window(params.get(0, defaults.get_k_window())?)
                        .d_window(params.get(1, defaults.get_d_window())?),
                )
            }
            "adx" | "dmi" => {
                params.at_most(1)?;
                Self::Adx(Adx::new().period(params.get(0, Adx::default().get_period())?))
            }
            "vwap" => {
                params.at_most(0)?;
                Self::Vwap
            }
            _ => {
                return Err(Error::UnknownIndicator {
                    name: head.trim().to_string(),
                })
            }
        };
        Ok(request)
    }
}

impl TryFrom<String> for IndicatorRequest {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<IndicatorRequest> for String {
    fn from(request: IndicatorRequest) -> Self {
        request.to_string()
    }
}
