//! Stochastic Oscillator — %K and %D.
//!
//! %K = (close - lowest_low(k_period)) / (highest_high - lowest_low) * 100
//! %D = SMA(%K, d_period)
//! Lookback: k_period - 1 for %K, k_period + d_period - 2 for %D.
//! Zero high-low range (flat window) → %K = 50.

use crate::domain::Bar;
use crate::indicators::sma::sma_of_series;
use crate::indicators::Indicator;

/// Which output line of the Stochastic to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticOutput {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    output: StochasticOutput,
    name: String,
}

impl Stochastic {
    pub fn k(k_period: usize, d_period: usize) -> Self {
        Self::make(k_period, d_period, StochasticOutput::K, "k")
    }

    pub fn d(k_period: usize, d_period: usize) -> Self {
        Self::make(k_period, d_period, StochasticOutput::D, "d")
    }

    fn make(k_period: usize, d_period: usize, output: StochasticOutput, label: &str) -> Self {
        assert!(k_period >= 1, "Stochastic %K period must be >= 1");
        assert!(d_period >= 1, "Stochastic %D period must be >= 1");
        Self {
            k_period,
            d_period,
            output,
            name: format!("stoch_{label}_{k_period}_{d_period}"),
        }
    }

    fn compute_k(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.k_period {
            return result;
        }

        for i in (self.k_period - 1)..n {
            let window = &bars[i + 1 - self.k_period..=i];
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
                50.0
            } else {
                (bars[i].close - ll) / range * 100.0
            };
        }

        result
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            StochasticOutput::K => self.k_period - 1,
            StochasticOutput::D => self.k_period + self.d_period - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let k = self.compute_k(bars);
        match self.output {
            StochasticOutput::K => k,
            StochasticOutput::D => sma_of_series(&k, self.d_period),
        }
    }
}
