//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! Seed: EMA[period-1] = SMA of first `period` close values.
//! Lookback: period - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.period)
    }
}

/// Compute raw EMA values from a pre-extracted f64 slice.
///
/// The seed window starts at the first non-NaN index, so this can be chained
/// onto series that carry their own warm-up prefix (MACD signal line,
/// Keltner midline, Coppock smoothing). A NaN after the seed taints all
/// subsequent values.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 {
        return result;
    }

    let start = match values.iter().position(|v| !v.is_nan()) {
        Some(idx) => idx,
        None => return result,
    };

    if n - start < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of the first `period` valid values.
    let mut sum = 0.0;
    for &v in &values[start..start + period] {
        if v.is_nan() {
            return result;
        }
        sum += v;
    }
    let seed = sum / period as f64;
    let seed_idx = start + period - 1;
    result[seed_idx] = seed;

    let mut prev = seed;
    for i in (seed_idx + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_3_known_values() {
        // alpha = 2/(3+1) = 0.5
        // Seed at index 2: SMA(10,11,12) = 11.0
        // EMA[3] = 0.5*13 + 0.5*11.0 = 12.0
        // EMA[4] = 0.5*14 + 0.5*12.0 = 13.0
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = Ema::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_period_1_equals_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        let result = Ema::new(1).compute(&bars);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_of_series_skips_nan_prefix() {
        // Two NaN warm-up entries, then values: seed lands at index 1 + 3 - 1 = 3.
        let values = [f64::NAN, 10.0, 11.0, 12.0, 13.0];
        let result = ema_of_series(&values, 3);
        assert!(result[0].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 11.0, DEFAULT_EPSILON);
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_insufficient_data_all_nan() {
        let bars = make_bars(&[10.0, 11.0]);
        let result = Ema::new(5).compute(&bars);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_lookback() {
        assert_eq!(Ema::new(20).lookback(), 19);
        assert_eq!(Ema::new(1).lookback(), 0);
    }
}
