//! Simple Moving Average (SMA).
//!
//! sma[t] = mean(close[t-period+1..=t]). Lookback: period - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        sma_of_series(&closes, self.period)
    }
}

/// Compute raw SMA values from a pre-extracted f64 slice.
///
/// Shared by composed indicators (Bollinger middle, Stochastic %D, Awesome
/// Oscillator, OBV trend line) that need an SMA of an arbitrary series.
/// A NaN anywhere in a window yields NaN at that index.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        let mut sum = 0.0;
        let mut has_nan = false;
        for &v in window {
            if v.is_nan() {
                has_nan = true;
                break;
            }
            sum += v;
        }
        if !has_nan {
            result[i] = sum / period as f64;
        }
    }

    result
}
