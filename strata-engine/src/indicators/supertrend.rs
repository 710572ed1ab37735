//! Supertrend — ATR-based directional indicator.
//!
//! Inherently sequential: direction flips between support and resistance
//! based on close vs band comparisons. Two output series:
//! - Value: the active band (lower band when trending up, upper when down)
//! - Direction: +1 trending up, -1 trending down, 0 at the seed bar
//!
//! Lookback: atr_period.

use crate::domain::Bar;
use crate::indicators::atr::{true_range, wilder_smooth};
use crate::indicators::Indicator;

/// Which Supertrend output series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupertrendOutput {
    Value,
    Direction,
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    output: SupertrendOutput,
    name: String,
}

impl Supertrend {
    pub fn value(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, SupertrendOutput::Value, "value")
    }

    pub fn direction(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, SupertrendOutput::Direction, "direction")
    }

    fn make(period: usize, multiplier: f64, output: SupertrendOutput, label: &str) -> Self {
        assert!(period >= 1, "Supertrend period must be >= 1");
        assert!(multiplier > 0.0, "Supertrend multiplier must be > 0");
        Self {
            period,
            multiplier,
            output,
            name: format!("supertrend_{label}_{period}_{multiplier}"),
        }
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut value = vec![f64::NAN; n];
        let mut direction = vec![f64::NAN; n];

        let mut tr = true_range(bars);
        if !tr.is_empty() {
            tr[0] = f64::NAN; // TR[0] has no previous close
        }
        let atr = wilder_smooth(&tr, self.period);

        let start = match atr.iter().position(|v| !v.is_nan()) {
            Some(idx) => idx,
            None => {
                return match self.output {
                    SupertrendOutput::Value => value,
                    SupertrendOutput::Direction => direction,
                }
            }
        };

        // Seed: start trending up from the first valid ATR bar. Direction is
        // 0 there because no flip has been observed yet.
        let hl2 = (bars[start].high + bars[start].low) / 2.0;
        let mut upper_band = hl2 + self.multiplier * atr[start];
        let mut lower_band = hl2 - self.multiplier * atr[start];
        let mut trending_up = true;
        value[start] = lower_band;
        direction[start] = 0.0;

        for i in (start + 1)..n {
            if atr[i].is_nan() || bars[i].is_void() {
                continue;
            }

            let hl2 = (bars[i].high + bars[i].low) / 2.0;
            let basic_upper = hl2 + self.multiplier * atr[i];
            let basic_lower = hl2 - self.multiplier * atr[i];

            // Bands only tighten while price stays on their side.
            let prev_close = bars[i - 1].close;
            upper_band = if !prev_close.is_nan() && prev_close <= upper_band {
                basic_upper.min(upper_band)
            } else {
                basic_upper
            };
            lower_band = if !prev_close.is_nan() && prev_close >= lower_band {
                basic_lower.max(lower_band)
            } else {
                basic_lower
            };

            if trending_up && bars[i].close < lower_band {
                trending_up = false;
            } else if !trending_up && bars[i].close > upper_band {
                trending_up = true;
            }

            value[i] = if trending_up { lower_band } else { upper_band };
            direction[i] = if trending_up { 1.0 } else { -1.0 };
        }

        match self.output {
            SupertrendOutput::Value => value,
            SupertrendOutput::Direction => direction,
        }
    }
}
