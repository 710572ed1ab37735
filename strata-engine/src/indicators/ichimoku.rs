//! Ichimoku components.
//!
//! - Tenkan (conversion): midpoint of the high/low range over `tenkan` bars
//! - Kijun (base): same over `kijun` bars
//! - Senkou A: (tenkan + kijun) / 2
//! - Senkou B: midpoint over `senkou_b` bars
//!
//! Lines are computed unshifted (no forward cloud displacement) so every
//! series stays index-aligned with the bars, which is what the signal scan
//! compares against.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which Ichimoku line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IchimokuLine {
    Tenkan,
    Kijun,
    SenkouA,
    SenkouB,
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan: usize,
    kijun: usize,
    senkou_b: usize,
    line: IchimokuLine,
    name: String,
}

impl Ichimoku {
    pub fn new(tenkan: usize, kijun: usize, senkou_b: usize, line: IchimokuLine) -> Self {
        assert!(tenkan >= 1, "Ichimoku tenkan period must be >= 1");
        assert!(kijun >= 1, "Ichimoku kijun period must be >= 1");
        assert!(senkou_b >= 1, "Ichimoku senkou B period must be >= 1");
        let label = match line {
            IchimokuLine::Tenkan => "tenkan",
            IchimokuLine::Kijun => "kijun",
            IchimokuLine::SenkouA => "senkou_a",
            IchimokuLine::SenkouB => "senkou_b",
        };
        Self {
            tenkan,
            kijun,
            senkou_b,
            line,
            name: format!("ichimoku_{label}_{tenkan}_{kijun}_{senkou_b}"),
        }
    }
}

/// Midpoint of the high/low range over a trailing window.
fn range_midpoint(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
        let mut hh = f64::NEG_INFINITY;
        let mut ll = f64::INFINITY;
        let mut has_nan = false;
        for bar in window {
            if bar.high.is_nan() || bar.low.is_nan() {
                has_nan = true;
                break;
            }
            hh = hh.max(bar.high);
            ll = ll.min(bar.low);
        }
        if !has_nan {
            result[i] = (hh + ll) / 2.0;
        }
    }

    result
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            IchimokuLine::Tenkan => self.tenkan - 1,
            IchimokuLine::Kijun => self.kijun - 1,
            IchimokuLine::SenkouA => self.tenkan.max(self.kijun) - 1,
            IchimokuLine::SenkouB => self.senkou_b - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.line {
            IchimokuLine::Tenkan => range_midpoint(bars, self.tenkan),
            IchimokuLine::Kijun => range_midpoint(bars, self.kijun),
            IchimokuLine::SenkouA => {
                let tenkan = range_midpoint(bars, self.tenkan);
                let kijun = range_midpoint(bars, self.kijun);
                tenkan
                    .iter()
                    .zip(&kijun)
                    .map(|(&t, &k)| (t + k) / 2.0)
                    .collect()
            }
            IchimokuLine::SenkouB => range_midpoint(bars, self.senkou_b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    fn bars() -> Vec<Bar> {
        make_ohlc_bars(&[
            (100.0, 104.0, 96.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 112.0, 104.0, 110.0),
            (110.0, 116.0, 108.0, 114.0),
        ])
    }

    #[test]
    fn tenkan_is_range_midpoint() {
        let bars = bars();
        let tenkan = Ichimoku::new(2, 3, 4, IchimokuLine::Tenkan).compute(&bars);
        // Window bars 2..=3: hh = 116, ll = 104 → 110.
        assert_approx(tenkan[3], 110.0, DEFAULT_EPSILON);
    }

    #[test]
    fn senkou_a_is_average_of_tenkan_kijun() {
        let bars = bars();
        let tenkan = Ichimoku::new(2, 3, 4, IchimokuLine::Tenkan).compute(&bars);
        let kijun = Ichimoku::new(2, 3, 4, IchimokuLine::Kijun).compute(&bars);
        let senkou_a = Ichimoku::new(2, 3, 4, IchimokuLine::SenkouA).compute(&bars);
        assert_approx(senkou_a[3], (tenkan[3] + kijun[3]) / 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn senkou_b_needs_longest_window() {
        let bars = bars();
        let senkou_b = Ichimoku::new(2, 3, 4, IchimokuLine::SenkouB).compute(&bars);
        assert!(senkou_b[2].is_nan());
        // hh = 116, ll = 96 → 106.
        assert_approx(senkou_b[3], 106.0, DEFAULT_EPSILON);
    }

    #[test]
    fn lookbacks_per_line() {
        assert_eq!(Ichimoku::new(9, 26, 52, IchimokuLine::Tenkan).lookback(), 8);
        assert_eq!(Ichimoku::new(9, 26, 52, IchimokuLine::Kijun).lookback(), 25);
        assert_eq!(Ichimoku::new(9, 26, 52, IchimokuLine::SenkouA).lookback(), 25);
        assert_eq!(Ichimoku::new(9, 26, 52, IchimokuLine::SenkouB).lookback(), 51);
    }
}
