//! Chart Indicators Example
//!
//! Computes the indicator set drawn under a stock chart for one symbol at
//! three timeframes and prints the latest value of each channel.
//!
//! Run with: `RUST_LOG=stock_ta=debug cargo run --example chart_indicators`

#![allow(clippy::cast_precision_loss)]

use stock_ta::prelude::*;
use tracing_subscriber::EnvFilter;

/// Synthetic daily bars, one per day starting 2023-01-01.
fn daily_bars(days: usize) -> Vec<Bar> {
    let mut close = 150.0_f64;
    (0..days)
        .map(|i| {
            let t = i as f64;
            let open = close;
            close = (close + (t * 0.21).sin() * 2.5 + (t * 0.05).cos()).max(1.0);
            Bar {
                timestamp: 1_672_531_200 + i as i64 * 86_400,
                open,
                high: open.max(close) + 0.8,
                low: open.min(close) - 0.8,
                close,
                volume: 1_000_000.0 + (t * 0.9).sin().abs() * 400_000.0,
            }
        })
        .collect()
}

/// Merges consecutive groups of `size` bars into one.
fn resample(bars: &[Bar], size: usize) -> Vec<Bar> {
    bars.chunks(size)
        .map(|chunk| Bar {
            timestamp: chunk[0].timestamp,
            open: chunk[0].open,
            high: chunk.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
            low: chunk.iter().map(|b| b.low).fold(f64::INFINITY, f64::min),
            close: chunk[chunk.len() - 1].close,
            volume: chunk.iter().map(|b| b.volume).sum(),
        })
        .collect()
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let daily = daily_bars(750);
    let timeframes = [
        ("monthly", PriceSeries::from_bars(&resample(&daily, 21))?),
        ("weekly", PriceSeries::from_bars(&resample(&daily, 5))?),
        ("daily", PriceSeries::from_bars(&daily)?),
    ];

    let config: PipelineConfig = serde_json::from_str(
        r#"{
            "indicators": ["EMA5", "EMA13", "EMA26", "EMA50", "EMA200", "VWAP",
                           "Bollinger Bands", "MACD", "RSI", "Stochastic", "ADX"],
            "error_policy": "collect"
        }"#,
    )?;
    let pipeline = Pipeline::from_config(config);

    for (label, report) in BatchProcessor::new().run_labeled(&pipeline, &timeframes)? {
        println!("=== {label} ({} bars) ===", report.frame.len());
        let Some(&last) = report.frame.timestamps().last() else {
            continue;
        };
        for name in report.frame.names() {
            match report.frame.value_at(name, last) {
                Some(value) if value.is_nan() => println!("  {name:<14} (warming up)"),
                Some(value) => println!("  {name:<14} {value:>10.4}"),
                None => {}
            }
        }
        for failure in &report.failures {
            println!("  {} failed: {}", failure.request, failure.error);
        }
        println!();
    }

    Ok(())
}
