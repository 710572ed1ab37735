//! Williams %R.
//!
//! %R = (highest_high - close) / (highest_high - lowest_low) * -100
//! Range [-100, 0]. Lookback: period - 1. Flat window → -50.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
    name: String,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self {
            period,
            name: format!("williams_r_{period}"),
        }
    }
}

impl Indicator for WilliamsR {
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

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];
            let mut hh = f64::NEG_INFINITY;
            let mut ll = f64::INFINITY;
            let mut has_nan = bars[i].close.is_nan();
            for bar in window {
                if bar.high.is_nan() || bar.low.is_nan() {
                    has_nan = true;
                    break;
                }
                hh = hh.max(bar.high);
                ll = ll.min(bar.low);
            }
            if has_nan {
                continue;
            }
            let range = hh - ll;
            result[i] = if range == 0.0 {
                -50.0
            } else {
                (hh - bars[i].close) / range * -100.0
            };
        }

        result
    }
}
