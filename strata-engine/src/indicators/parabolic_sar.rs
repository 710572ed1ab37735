//! Parabolic SAR — Wilder's acceleration factor system.
//!
//! Inherently sequential: maintains direction, extreme point (EP), and
//! acceleration factor (AF). Two output series:
//! - Value: the SAR level
//! - Direction: +1 long, -1 short
//!
//! Parameters: af_start (default 0.02), af_step (0.02), af_max (0.20).
//! Lookback: 1 (needs two bars to seed).

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which Parabolic SAR output series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsarOutput {
    Value,
    Direction,
}

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    af_start: f64,
    af_step: f64,
    af_max: f64,
    output: PsarOutput,
    name: String,
}

impl ParabolicSar {
    pub fn value(af_start: f64, af_step: f64, af_max: f64) -> Self {
        Self::make(af_start, af_step, af_max, PsarOutput::Value, "value")
    }

    pub fn direction(af_start: f64, af_step: f64, af_max: f64) -> Self {
        Self::make(af_start, af_step, af_max, PsarOutput::Direction, "direction")
    }

    fn make(af_start: f64, af_step: f64, af_max: f64, output: PsarOutput, label: &str) -> Self {
        assert!(af_start > 0.0, "AF start must be > 0");
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_start, "AF max must be >= AF start");
        Self {
            af_start,
            af_step,
            af_max,
            output,
            name: format!("psar_{label}_{af_start}_{af_step}_{af_max}"),
        }
    }
}

impl Indicator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut value = vec![f64::NAN; n];
        let mut direction = vec![f64::NAN; n];

        if n < 2 || bars[0].is_void() || bars[1].is_void() {
            return match self.output {
                PsarOutput::Value => value,
                PsarOutput::Direction => direction,
            };
        }

        // Seed direction from the first two closes.
        let mut is_long = bars[1].close >= bars[0].close;
        let mut af = self.af_start;
        let mut ep;
        let mut sar;

        if is_long {
            sar = bars[0].low;
            ep = bars[1].high;
        } else {
            sar = bars[0].high;
            ep = bars[1].low;
        }

        value[1] = sar;
        direction[1] = if is_long { 1.0 } else { -1.0 };

        for i in 2..n {
            if bars[i].is_void() {
                continue;
            }

            let mut new_sar = sar + af * (ep - sar);

            if is_long {
                // SAR must not be above the two previous lows.
                new_sar = new_sar.min(bars[i - 1].low).min(bars[i - 2].low);

                if bars[i].low < new_sar {
                    // Reverse to short: SAR becomes the previous EP.
                    is_long = false;
                    new_sar = ep;
                    ep = bars[i].low;
                    af = self.af_start;
                } else if bars[i].high > ep {
                    ep = bars[i].high;
                    af = (af + self.af_step).min(self.af_max);
                }
            } else {
                // SAR must not be below the two previous highs.
                new_sar = new_sar.max(bars[i - 1].high).max(bars[i - 2].high);

                if bars[i].high > new_sar {
                    is_long = true;
                    new_sar = ep;
                    ep = bars[i].high;
                    af = self.af_start;
                } else if bars[i].low < ep {
                    ep = bars[i].low;
                    af = (af + self.af_step).min(self.af_max);
                }
            }

            sar = new_sar;
            value[i] = sar;
            direction[i] = if is_long { 1.0 } else { -1.0 };
        }

        match self.output {
            PsarOutput::Value => value,
            PsarOutput::Direction => direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_ohlc_bars;

    fn defaults_value() -> ParabolicSar {
        ParabolicSar::value(0.02, 0.02, 0.20)
    }

    fn defaults_direction() -> ParabolicSar {
        ParabolicSar::direction(0.02, 0.02, 0.20)
    }

    #[test]
    fn psar_uptrend_stays_long_below_price() {
        let bars = make_ohlc_bars(
            &(0..15)
                .map(|i| {
                    let c = 100.0 + i as f64 * 2.0;
                    (c - 1.0, c + 1.0, c - 2.0, c)
                })
                .collect::<Vec<_>>(),
        );
        let value = defaults_value().compute(&bars);
        let dir = defaults_direction().compute(&bars);
        for i in 2..15 {
            assert!(dir[i] > 0.0, "expected long at bar {i}");
            assert!(value[i] < bars[i].low, "SAR must trail below price");
        }
    }

    #[test]
    fn psar_reverses_on_breakdown() {
        let mut data: Vec<(f64, f64, f64, f64)> = (0..10)
            .map(|i| {
                let c = 100.0 + i as f64 * 2.0;
                (c - 1.0, c + 1.0, c - 2.0, c)
            })
            .collect();
        // Collapse below any trailing SAR level.
        data.push((80.0, 81.0, 70.0, 71.0));
        let bars = make_ohlc_bars(&data);
        let dir = defaults_direction().compute(&bars);
        assert!(dir[9] > 0.0);
        assert!(dir[10] < 0.0);
    }

    #[test]
    fn psar_warmup_prefix() {
        let bars = make_ohlc_bars(&[
            (100.0, 102.0, 98.0, 101.0),
            (101.0, 103.0, 99.0, 102.0),
            (102.0, 104.0, 100.0, 103.0),
        ]);
        let value = defaults_value().compute(&bars);
        assert!(value[0].is_nan());
        assert!(!value[1].is_nan());
    }

    #[test]
    fn psar_too_short_is_all_nan() {
        let bars = make_ohlc_bars(&[(100.0, 102.0, 98.0, 101.0)]);
        let value = defaults_value().compute(&bars);
        assert!(value.iter().all(|v| v.is_nan()));
    }
}
