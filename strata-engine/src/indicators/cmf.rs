//! Chaikin Money Flow (CMF).
//!
//! Money flow multiplier: ((close - low) - (high - close)) / (high - low)
//! Money flow volume: multiplier * volume (zero for zero-range bars)
//! CMF = sum(mfv, period) / sum(volume, period)
//! Lookback: period - 1. Zero window volume → 0.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Cmf {
    period: usize,
    name: String,
}

impl Cmf {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CMF period must be >= 1");
        Self {
            period,
            name: format!("cmf_{period}"),
        }
    }
}

impl Indicator for Cmf {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let mfv: Vec<f64> = bars
            .iter()
            .map(|b| {
                if b.is_void() {
                    f64::NAN
                } else if b.high == b.low {
                    0.0
                } else {
                    ((b.close - b.low) - (b.high - b.close)) / (b.high - b.low) * b.volume
                }
            })
            .collect();

        for i in (self.period - 1)..n {
            let window = i + 1 - self.period..=i;
            if mfv[window.clone()].iter().any(|v| v.is_nan()) {
                continue;
            }
            let mfv_sum: f64 = mfv[window.clone()].iter().sum();
            let vol_sum: f64 = bars[window].iter().map(|b| b.volume).sum();
            result[i] = if vol_sum == 0.0 { 0.0 } else { mfv_sum / vol_sum };
        }

        result
    }
}
