//! On-Balance Volume (OBV).
//!
//! Cumulative volume signed by the close-to-close direction:
//! up close adds volume, down close subtracts, unchanged close adds nothing.
//! OBV[0] = 0. Lookback: 0.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Obv {
    name: String,
}

impl Obv {
    pub fn new() -> Self {
        Self {
            name: "obv".to_string(),
        }
    }
}

impl Default for Obv {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n == 0 {
            return result;
        }

        if bars[0].close.is_nan() {
            return result;
        }
        let mut obv = 0.0;
        result[0] = obv;

        for i in 1..n {
            let curr = bars[i].close;
            let prev = bars[i - 1].close;
            if curr.is_nan() || prev.is_nan() {
                return result;
            }
            if curr > prev {
                obv += bars[i].volume;
            } else if curr < prev {
                obv -= bars[i].volume;
            }
            result[i] = obv;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn obv_accumulates_signed_volume() {
        // Closes: 10 → 11 (up, +1000) → 10 (down, -1000) → 10 (flat, +0) → 12 (up, +1000)
        let bars = make_bars(&[10.0, 11.0, 10.0, 10.0, 12.0]);
        let obv = Obv::new().compute(&bars);
        assert_approx(obv[0], 0.0, DEFAULT_EPSILON);
        assert_approx(obv[1], 1000.0, DEFAULT_EPSILON);
        assert_approx(obv[2], 0.0, DEFAULT_EPSILON);
        assert_approx(obv[3], 0.0, DEFAULT_EPSILON);
        assert_approx(obv[4], 1000.0, DEFAULT_EPSILON);
    }

    #[test]
    fn obv_no_warmup() {
        let bars = make_bars(&[10.0]);
        let obv = Obv::new().compute(&bars);
        assert_approx(obv[0], 0.0, DEFAULT_EPSILON);
    }
}
