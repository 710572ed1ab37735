//! Coppock Curve.
//!
//! WMA(ROC(long) + ROC(short), wma_period), classic parameters 14/11/10.
//! ROC(n)[t] = (close[t] - close[t-n]) / close[t-n] * 100
//! Lookback: long_roc + wma_period - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Coppock {
    long_roc: usize,
    short_roc: usize,
    wma_period: usize,
    name: String,
}

impl Coppock {
    pub fn new(long_roc: usize, short_roc: usize, wma_period: usize) -> Self {
        assert!(short_roc >= 1, "Coppock short ROC period must be >= 1");
        assert!(long_roc > short_roc, "Coppock long ROC must be > short ROC");
        assert!(wma_period >= 1, "Coppock WMA period must be >= 1");
        Self {
            long_roc,
            short_roc,
            wma_period,
            name: format!("coppock_{long_roc}_{short_roc}_{wma_period}"),
        }
    }
}

/// Rate of change in percent over `period` bars. NaN where the base is zero.
fn roc(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    for i in period..n {
        let base = closes[i - period];
        if base.is_nan() || closes[i].is_nan() || base == 0.0 {
            continue;
        }
        result[i] = (closes[i] - base) / base * 100.0;
    }
    result
}

/// Linearly weighted moving average: latest value gets weight `period`.
fn wma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    let weight_sum = (period * (period + 1)) as f64 / 2.0;
    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let weighted: f64 = window
            .iter()
            .enumerate()
            .map(|(j, &v)| v * (j + 1) as f64)
            .sum();
        result[i] = weighted / weight_sum;
    }

    result
}

impl Indicator for Coppock {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.long_roc + self.wma_period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let long = roc(&closes, self.long_roc);
        let short = roc(&closes, self.short_roc);
        let combined: Vec<f64> = long.iter().zip(&short).map(|(&l, &s)| l + s).collect();
        wma_of_series(&combined, self.wma_period)
    }
}
