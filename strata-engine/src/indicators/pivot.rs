//! Pivot Points — classic floor-trader levels from the previous bar.
//!
//! PP = (prev_high + prev_low + prev_close) / 3
//! R1 = 2*PP - prev_low      S1 = 2*PP - prev_high
//! R2 = PP + (prev_high - prev_low)   S2 = PP - (prev_high - prev_low)
//! R3 = prev_high + 2*(PP - prev_low) S3 = prev_low - 2*(prev_high - PP)
//! Lookback: 1 (each bar's levels come from the bar before it).

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which pivot level to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotLevel {
    Pp,
    R1,
    R2,
    R3,
    S1,
    S2,
    S3,
}

impl PivotLevel {
    fn label(&self) -> &'static str {
        match self {
            PivotLevel::Pp => "pp",
            PivotLevel::R1 => "r1",
            PivotLevel::R2 => "r2",
            PivotLevel::R3 => "r3",
            PivotLevel::S1 => "s1",
            PivotLevel::S2 => "s2",
            PivotLevel::S3 => "s3",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pivot {
    level: PivotLevel,
    name: String,
}

impl Pivot {
    pub fn new(level: PivotLevel) -> Self {
        Self {
            level,
            name: format!("pivot_{}", level.label()),
        }
    }
}

impl Indicator for Pivot {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        for i in 1..n {
            let prev = &bars[i - 1];
            if prev.is_void() {
                continue;
            }
            let (h, l, c) = (prev.high, prev.low, prev.close);
            let pp = (h + l + c) / 3.0;
            result[i] = match self.level {
                PivotLevel::Pp => pp,
                PivotLevel::R1 => 2.0 * pp - l,
                PivotLevel::S1 => 2.0 * pp - h,
                PivotLevel::R2 => pp + (h - l),
                PivotLevel::S2 => pp - (h - l),
                PivotLevel::R3 => h + 2.0 * (pp - l),
                PivotLevel::S3 => l - 2.0 * (h - pp),
            };
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    fn bars() -> Vec<Bar> {
        make_ohlc_bars(&[
            (100.0, 110.0, 90.0, 105.0),
            (105.0, 108.0, 102.0, 104.0),
        ])
    }

    #[test]
    fn pivot_point_from_previous_bar() {
        let pp = Pivot::new(PivotLevel::Pp).compute(&bars());
        assert!(pp[0].is_nan());
        // (110 + 90 + 105) / 3
        assert_approx(pp[1], 305.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn resistance_and_support_levels() {
        let bars = bars();
        let pp = 305.0 / 3.0;
        let r1 = Pivot::new(PivotLevel::R1).compute(&bars);
        let s1 = Pivot::new(PivotLevel::S1).compute(&bars);
        let r2 = Pivot::new(PivotLevel::R2).compute(&bars);
        let s2 = Pivot::new(PivotLevel::S2).compute(&bars);
        let r3 = Pivot::new(PivotLevel::R3).compute(&bars);
        let s3 = Pivot::new(PivotLevel::S3).compute(&bars);
        assert_approx(r1[1], 2.0 * pp - 90.0, DEFAULT_EPSILON);
        assert_approx(s1[1], 2.0 * pp - 110.0, DEFAULT_EPSILON);
        assert_approx(r2[1], pp + 20.0, DEFAULT_EPSILON);
        assert_approx(s2[1], pp - 20.0, DEFAULT_EPSILON);
        assert_approx(r3[1], 110.0 + 2.0 * (pp - 90.0), DEFAULT_EPSILON);
        assert_approx(s3[1], 90.0 - 2.0 * (110.0 - pp), DEFAULT_EPSILON);
    }

    #[test]
    fn level_ordering() {
        let bars = bars();
        let levels: Vec<f64> = [
            PivotLevel::S3,
            PivotLevel::S2,
            PivotLevel::S1,
            PivotLevel::Pp,
            PivotLevel::R1,
            PivotLevel::R2,
            PivotLevel::R3,
        ]
        .iter()
        .map(|&lv| Pivot::new(lv).compute(&bars)[1])
        .collect();
        for pair in levels.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}
