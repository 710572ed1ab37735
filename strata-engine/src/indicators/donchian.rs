//! Donchian Channel — highest high / lowest low over a lookback window.
//!
//! Upper: max(high[t-period+1..=t])
//! Lower: min(low[t-period+1..=t])
//! Lookback: period - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which band of the Donchian channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonchianBand {
    Upper,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
    band: DonchianBand,
    name: String,
}

impl Donchian {
    pub fn upper(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Upper,
            name: format!("donchian_upper_{period}"),
        }
    }

    pub fn lower(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Lower,
            name: format!("donchian_lower_{period}"),
        }
    }
}

impl Indicator for Donchian {
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
            let mut extreme = match self.band {
                DonchianBand::Upper => f64::NEG_INFINITY,
                DonchianBand::Lower => f64::INFINITY,
            };
            let mut has_nan = false;
            for bar in window {
                match self.band {
                    DonchianBand::Upper => {
                        if bar.high.is_nan() {
                            has_nan = true;
                            break;
                        }
                        extreme = extreme.max(bar.high);
                    }
                    DonchianBand::Lower => {
                        if bar.low.is_nan() {
                            has_nan = true;
                            break;
                        }
                        extreme = extreme.min(bar.low);
                    }
                }
            }
            if !has_nan {
                result[i] = extreme;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn donchian_upper_is_window_high() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 98.0, 102.0),
            (102.0, 110.0, 100.0, 108.0),
            (108.0, 109.0, 104.0, 106.0),
        ]);
        let upper = Donchian::upper(3).compute(&bars);
        assert_approx(upper[2], 110.0, DEFAULT_EPSILON);
    }

    #[test]
    fn donchian_lower_is_window_low() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 98.0, 102.0),
            (102.0, 110.0, 100.0, 108.0),
            (108.0, 109.0, 104.0, 106.0),
        ]);
        let lower = Donchian::lower(3).compute(&bars);
        assert_approx(lower[2], 98.0, DEFAULT_EPSILON);
    }

    #[test]
    fn donchian_rolls_off_old_extremes() {
        let bars = make_ohlc_bars(&[
            (100.0, 120.0, 98.0, 102.0),
            (102.0, 104.0, 100.0, 103.0),
            (103.0, 105.0, 101.0, 104.0),
            (104.0, 106.0, 102.0, 105.0),
        ]);
        let upper = Donchian::upper(2).compute(&bars);
        assert_approx(upper[1], 120.0, DEFAULT_EPSILON);
        assert_approx(upper[3], 106.0, DEFAULT_EPSILON); // 120 fell out of the window
    }

    #[test]
    fn donchian_warmup_prefix() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 98.0, 102.0),
            (102.0, 110.0, 100.0, 108.0),
            (108.0, 109.0, 104.0, 106.0),
        ]);
        let upper = Donchian::upper(3).compute(&bars);
        assert!(upper[0].is_nan());
        assert!(upper[1].is_nan());
    }
}
