//! Indicator library — pure transforms from bar series to aligned numeric series.
//!
//! Every indicator implements the `Indicator` trait: bar history in, a
//! `Vec<f64>` of the same length out, with `f64::NAN` padding the warm-up
//! prefix where insufficient history exists. Indicators never mutate their
//! input and are recomputed fresh on each strategy invocation — no caching,
//! no shared state.
//!
//! Multi-series indicators (MACD, Bollinger, Stochastic, Ichimoku, channels,
//! Supertrend, Parabolic SAR, pivots) are exposed as separate named
//! instances per output line, keeping the single-series trait unchanged.

pub mod atr;
pub mod awesome;
pub mod bollinger;
pub mod cci;
pub mod cmf;
pub mod coppock;
pub mod donchian;
pub mod ema;
pub mod ichimoku;
pub mod keltner;
pub mod macd;
pub mod momentum;
pub mod obv;
pub mod parabolic_sar;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod vwap;
pub mod williams_r;

pub use atr::Atr;
pub use awesome::AwesomeOscillator;
pub use bollinger::{Bollinger, BollingerBand};
pub use cci::Cci;
pub use cmf::Cmf;
pub use coppock::Coppock;
pub use donchian::{Donchian, DonchianBand};
pub use ema::Ema;
pub use ichimoku::{Ichimoku, IchimokuLine};
pub use keltner::{Keltner, KeltnerBand};
pub use macd::{Macd, MacdOutput};
pub use momentum::Momentum;
pub use obv::Obv;
pub use parabolic_sar::{ParabolicSar, PsarOutput};
pub use pivot::{Pivot, PivotLevel};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochasticOutput};
pub use supertrend::{Supertrend, SupertrendOutput};
pub use vwap::Vwap;
pub use williams_r::WilliamsR;

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Implementations take the full bar series and produce an output series of
/// the same length, with the first `lookback()` values `f64::NAN`.
///
/// # Look-ahead guard
/// No output value at bar t may depend on data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Series name used as the `IndicatorValues` key (e.g., "sma_20").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Container for the indicator series a strategy computed for one run.
///
/// Owned by a single `AnnotatedSeries`; never shared between strategies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Iterate over the stored series names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|s| s.as_str())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume = 1000,
/// one bar per minute.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                time: i as i64 * 60_000,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples, volume 1000.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            time: i as i64 * 60_000,
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
