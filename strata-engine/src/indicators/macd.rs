//! MACD — Moving Average Convergence/Divergence.
//!
//! Line: EMA(close, fast) - EMA(close, slow)
//! Signal: EMA(line, signal_period)
//! Histogram: line - signal
//! Lookback: slow - 1 for the line, slow + signal_period - 2 for signal
//! and histogram.

use crate::domain::Bar;
use crate::indicators::ema::ema_of_series;
use crate::indicators::Indicator;

/// Which MACD output line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, output: MacdOutput) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must be > fast period");
        assert!(signal >= 1, "MACD signal period must be >= 1");
        let suffix = match output {
            MacdOutput::Line => "line",
            MacdOutput::Signal => "signal",
            MacdOutput::Histogram => "histogram",
        };
        Self {
            fast,
            slow,
            signal,
            output,
            name: format!("macd_{suffix}_{fast}_{slow}_{signal}"),
        }
    }

    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdOutput::Line)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdOutput::Signal)
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdOutput::Histogram)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => self.slow - 1,
            MacdOutput::Signal | MacdOutput::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast_ema = ema_of_series(&closes, self.fast);
        let slow_ema = ema_of_series(&closes, self.slow);

        let line: Vec<f64> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(&f, &s)| f - s) // NaN propagates through subtraction
            .collect();

        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => ema_of_series(&line, self.signal),
            MacdOutput::Histogram => {
                let signal = ema_of_series(&line, self.signal);
                line.iter().zip(&signal).map(|(&l, &s)| l - s).collect()
            }
        }
    }
}
