//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Middle: SMA(close, period)
//! Upper/Lower: middle ± mult * stddev(close, period)
//! Uses population stddev (divide by N). Lookback: period - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    fn make(period: usize, multiplier: f64, band: BollingerBand, label: &str) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, BollingerBand::Upper, "upper")
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, BollingerBand::Middle, "middle")
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::make(period, multiplier, BollingerBand::Lower, "lower")
    }
}

impl Indicator for Bollinger {
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

            let mut sum = 0.0;
            let mut has_nan = false;
            for bar in window {
                if bar.close.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += bar.close;
            }
            if has_nan {
                continue;
            }
            let mean = sum / self.period as f64;

            result[i] = match self.band {
                BollingerBand::Middle => mean,
                BollingerBand::Upper | BollingerBand::Lower => {
                    let variance: f64 = window
                        .iter()
                        .map(|bar| {
                            let diff = bar.close - mean;
                            diff * diff
                        })
                        .sum::<f64>()
                        / self.period as f64;
                    let offset = self.multiplier * variance.sqrt();
                    match self.band {
                        BollingerBand::Upper => mean + offset,
                        _ => mean - offset,
                    }
                }
            };
        }

        result
    }
}
