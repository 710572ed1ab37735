//! Keltner Channel — EMA midline ± ATR multiplier.
//!
//! Upper: EMA(close, ema_period) + mult * ATR(atr_period)
//! Lower: EMA(close, ema_period) - mult * ATR(atr_period)
//! Lookback: max(ema_period - 1, atr_period).

use crate::domain::Bar;
use crate::indicators::atr::{true_range, wilder_smooth};
use crate::indicators::ema::ema_of_series;
use crate::indicators::Indicator;

/// Which band of the Keltner channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeltnerBand {
    Upper,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Keltner {
    ema_period: usize,
    atr_period: usize,
    multiplier: f64,
    band: KeltnerBand,
    name: String,
}

impl Keltner {
    pub fn upper(ema_period: usize, atr_period: usize, multiplier: f64) -> Self {
        Self::make(ema_period, atr_period, multiplier, KeltnerBand::Upper, "upper")
    }

    pub fn lower(ema_period: usize, atr_period: usize, multiplier: f64) -> Self {
        Self::make(ema_period, atr_period, multiplier, KeltnerBand::Lower, "lower")
    }

    fn make(
        ema_period: usize,
        atr_period: usize,
        multiplier: f64,
        band: KeltnerBand,
        label: &str,
    ) -> Self {
        assert!(ema_period >= 1, "Keltner EMA period must be >= 1");
        assert!(atr_period >= 1, "Keltner ATR period must be >= 1");
        Self {
            ema_period,
            atr_period,
            multiplier,
            band,
            name: format!("keltner_{label}_{ema_period}_{atr_period}_{multiplier}"),
        }
    }
}

impl Indicator for Keltner {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        (self.ema_period - 1).max(self.atr_period)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let ema = ema_of_series(&closes, self.ema_period);

        let mut tr = true_range(bars);
        if !tr.is_empty() {
            tr[0] = f64::NAN;
        }
        let atr = wilder_smooth(&tr, self.atr_period);

        ema.iter()
            .zip(&atr)
            .map(|(&m, &a)| match self.band {
                KeltnerBand::Upper => m + self.multiplier * a,
                KeltnerBand::Lower => m - self.multiplier * a,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_ohlc_bars;

    fn bars() -> Vec<Bar> {
        make_ohlc_bars(
            &(0..12)
                .map(|i| {
                    let c = 100.0 + i as f64;
                    (c - 0.5, c + 1.0, c - 1.0, c)
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn keltner_bands_straddle_ema() {
        let bars = bars();
        let upper = Keltner::upper(5, 3, 1.5).compute(&bars);
        let lower = Keltner::lower(5, 3, 1.5).compute(&bars);
        for i in 5..12 {
            assert!(upper[i] > lower[i]);
        }
    }

    #[test]
    fn keltner_warmup_is_max_of_components() {
        let k = Keltner::upper(20, 10, 1.5);
        assert_eq!(k.lookback(), 19);
        let k = Keltner::upper(5, 10, 1.5);
        assert_eq!(k.lookback(), 10);
    }

    #[test]
    fn keltner_nan_until_both_components_valid() {
        let bars = bars();
        let upper = Keltner::upper(5, 3, 1.5).compute(&bars);
        // EMA(5) valid from index 4, ATR(3) from index 3 → both from 4.
        assert!(upper[3].is_nan());
        assert!(!upper[4].is_nan());
    }
}
