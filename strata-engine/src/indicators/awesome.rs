//! Awesome Oscillator (AO).
//!
//! AO = SMA(hl2, fast) - SMA(hl2, slow), hl2 = (high + low) / 2.
//! Standard periods: 5/34. Lookback: slow - 1.

use crate::domain::Bar;
use crate::indicators::sma::sma_of_series;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct AwesomeOscillator {
    fast: usize,
    slow: usize,
    name: String,
}

impl AwesomeOscillator {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "AO fast period must be >= 1");
        assert!(slow > fast, "AO slow period must be > fast period");
        Self {
            fast,
            slow,
            name: format!("ao_{fast}_{slow}"),
        }
    }
}

impl Indicator for AwesomeOscillator {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let hl2: Vec<f64> = bars.iter().map(|b| (b.high + b.low) / 2.0).collect();
        let fast = sma_of_series(&hl2, self.fast);
        let slow = sma_of_series(&hl2, self.slow);
        fast.iter().zip(&slow).map(|(&f, &s)| f - s).collect()
    }
}
