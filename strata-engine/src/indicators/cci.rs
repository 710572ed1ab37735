//! Commodity Channel Index (CCI).
//!
//! Typical price: tp = (high + low + close) / 3
//! CCI = (tp - SMA(tp, period)) / (0.015 * mean_deviation)
//! Lookback: period - 1. Zero mean deviation (flat window) → 0.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
    name: String,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self {
            period,
            name: format!("cci_{period}"),
        }
    }
}

impl Indicator for Cci {
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

        let tp: Vec<f64> = bars
            .iter()
            .map(|b| (b.high + b.low + b.close) / 3.0)
            .collect();

        for i in (self.period - 1)..n {
            let window = &tp[i + 1 - self.period..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let mean_dev =
                window.iter().map(|v| (v - mean).abs()).sum::<f64>() / self.period as f64;
            result[i] = if mean_dev == 0.0 {
                0.0
            } else {
                (tp[i] - mean) / (0.015 * mean_dev)
            };
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn cci_flat_window_is_zero() {
        let bars = make_ohlc_bars(&[
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 100.0, 100.0, 100.0),
        ]);
        let cci = Cci::new(3).compute(&bars);
        assert_approx(cci[2], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn cci_positive_when_tp_above_mean() {
        let bars = make_ohlc_bars(&[
            (100.0, 101.0, 99.0, 100.0),
            (100.0, 101.0, 99.0, 100.0),
            (104.0, 106.0, 103.0, 105.0),
        ]);
        let cci = Cci::new(3).compute(&bars);
        assert!(cci[2] > 0.0);
    }

    #[test]
    fn cci_known_value() {
        // TPs: 100, 100, 103. Mean = 101, mean_dev = (1+1+2)/3 = 4/3.
        // CCI[2] = (103 - 101) / (0.015 * 4/3) = 100.
        let bars = make_ohlc_bars(&[
            (100.0, 101.0, 99.0, 100.0),
            (100.0, 101.0, 99.0, 100.0),
            (102.0, 104.0, 102.0, 103.0),
        ]);
        let cci = Cci::new(3).compute(&bars);
        assert_approx(cci[2], 100.0, 1e-9);
    }

    #[test]
    fn cci_warmup_prefix() {
        let bars = make_ohlc_bars(&[
            (100.0, 101.0, 99.0, 100.0),
            (101.0, 102.0, 100.0, 101.0),
            (102.0, 103.0, 101.0, 102.0),
        ]);
        let cci = Cci::new(3).compute(&bars);
        assert!(cci[0].is_nan());
        assert!(cci[1].is_nan());
        assert!(!cci[2].is_nan());
    }
}
