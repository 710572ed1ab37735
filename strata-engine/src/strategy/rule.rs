//! The generic signal-rule engine.
//!
//! Every built-in strategy is the same left-to-right scan with a different
//! `Rule`: compare indicator value(s) at `i-1` and `i`, emit at most one
//! directional signal per bar. A signal is only evaluated when every
//! referenced value at both indices is non-NaN, so indicator warm-up
//! prefixes can never fire a spurious cross.

use crate::domain::{Bar, SignalKind};
use crate::indicators::{Indicator, IndicatorValues};

/// Pseudo-series name resolving to the bars' close prices.
///
/// Lets price-vs-indicator rules (VWAP cross, channel breakouts) reference
/// the close without duplicating it into `IndicatorValues`.
pub const CLOSE_SERIES: &str = "close";

/// Directional outcome of one rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
}

impl Bias {
    fn flipped(self) -> Self {
        match self {
            Bias::Bullish => Bias::Bearish,
            Bias::Bearish => Bias::Bullish,
        }
    }
}

/// A comparison/crossover rule over named indicator series.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `fast` crosses above `slow` → bullish; crosses below → bearish.
    CrossOver { fast: String, slow: String },
    /// Series crosses up through `level` → bullish; down through → bearish.
    LevelCross { series: String, level: f64 },
    /// Oscillator re-entry: cross up through `lower` → bullish (oversold
    /// exit), cross down through `upper` → bearish (overbought exit).
    BandRecross {
        series: String,
        lower: f64,
        upper: f64,
    },
    /// Close crosses above the `upper` bound → bullish; below `lower` →
    /// bearish.
    ChannelBreakout { upper: String, lower: String },
    /// Trend-direction series ({-1, 0, 1}) flips sign. The seed transition
    /// from 0 does not count as a flip.
    DirectionFlip { series: String },
}

impl Rule {
    /// Evaluate the rule at bar `i`, comparing `i-1` against `i`.
    ///
    /// Returns `None` when any referenced value is missing or NaN, or when
    /// no crossover occurred. `i` must be >= 1.
    pub fn evaluate(&self, indicators: &IndicatorValues, bars: &[Bar], i: usize) -> Option<Bias> {
        let fetch = |name: &str, idx: usize| -> Option<f64> {
            let v = if name == CLOSE_SERIES {
                bars.get(idx)?.close
            } else {
                indicators.get(name, idx)?
            };
            if v.is_nan() {
                None
            } else {
                Some(v)
            }
        };

        match self {
            Rule::CrossOver { fast, slow } => {
                let fast_prev = fetch(fast, i - 1)?;
                let fast_cur = fetch(fast, i)?;
                let slow_prev = fetch(slow, i - 1)?;
                let slow_cur = fetch(slow, i)?;
                if fast_prev <= slow_prev && fast_cur > slow_cur {
                    Some(Bias::Bullish)
                } else if fast_prev >= slow_prev && fast_cur < slow_cur {
                    Some(Bias::Bearish)
                } else {
                    None
                }
            }
            Rule::LevelCross { series, level } => {
                let prev = fetch(series, i - 1)?;
                let cur = fetch(series, i)?;
                if prev <= *level && cur > *level {
                    Some(Bias::Bullish)
                } else if prev >= *level && cur < *level {
                    Some(Bias::Bearish)
                } else {
                    None
                }
            }
            Rule::BandRecross {
                series,
                lower,
                upper,
            } => {
                let prev = fetch(series, i - 1)?;
                let cur = fetch(series, i)?;
                if prev <= *lower && cur > *lower {
                    Some(Bias::Bullish)
                } else if prev >= *upper && cur < *upper {
                    Some(Bias::Bearish)
                } else {
                    None
                }
            }
            Rule::ChannelBreakout { upper, lower } => {
                let close_prev = fetch(CLOSE_SERIES, i - 1)?;
                let close_cur = fetch(CLOSE_SERIES, i)?;
                let upper_prev = fetch(upper, i - 1)?;
                let upper_cur = fetch(upper, i)?;
                let lower_prev = fetch(lower, i - 1)?;
                let lower_cur = fetch(lower, i)?;
                if close_prev <= upper_prev && close_cur > upper_cur {
                    Some(Bias::Bullish)
                } else if close_prev >= lower_prev && close_cur < lower_cur {
                    Some(Bias::Bearish)
                } else {
                    None
                }
            }
            Rule::DirectionFlip { series } => {
                let prev = fetch(series, i - 1)?;
                let cur = fetch(series, i)?;
                if prev < 0.0 && cur > 0.0 {
                    Some(Bias::Bullish)
                } else if prev > 0.0 && cur < 0.0 {
                    Some(Bias::Bearish)
                } else {
                    None
                }
            }
        }
    }
}

/// Indicator bindings plus the rule that reads them.
///
/// Built fresh per `calculate` call from the merged params, so a blueprint
/// never outlives one run.
pub struct Blueprint {
    pub indicators: Vec<Box<dyn Indicator>>,
    pub rule: Rule,
}

impl Blueprint {
    pub fn new(indicators: Vec<Box<dyn Indicator>>, rule: Rule) -> Self {
        Self { indicators, rule }
    }

    /// Minimum number of bars before the rule can possibly fire: the
    /// longest indicator warm-up plus the two bars the crossover compares.
    pub fn required_lookback(&self) -> usize {
        self.indicators
            .iter()
            .map(|ind| ind.lookback())
            .max()
            .unwrap_or(0)
            + 2
    }
}

/// Strategy output: a structural copy of the input bars plus the computed
/// indicator series and the per-bar signal annotations, all index-aligned.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedSeries {
    pub bars: Vec<Bar>,
    pub indicators: IndicatorValues,
    pub signals: Vec<SignalKind>,
}

impl AnnotatedSeries {
    /// An unannotated copy: every signal `Hold`, no indicator series.
    /// Returned whenever the input is shorter than the required lookback.
    pub fn unannotated(bars: &[Bar]) -> Self {
        Self {
            bars: bars.to_vec(),
            indicators: IndicatorValues::new(),
            signals: vec![SignalKind::Hold; bars.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of non-`Hold` signals.
    pub fn signal_count(&self) -> usize {
        self.signals.iter().filter(|s| !s.is_hold()).count()
    }
}

/// Run a blueprint over the bars: compute its indicator series, scan from
/// index 1 applying the rule, and annotate. `reverse` swaps the outcome of
/// every rule evaluation before the signal is written.
pub fn run_blueprint(bars: &[Bar], blueprint: &Blueprint, reverse: bool) -> AnnotatedSeries {
    if bars.len() < blueprint.required_lookback() {
        return AnnotatedSeries::unannotated(bars);
    }

    let mut indicators = IndicatorValues::new();
    for ind in &blueprint.indicators {
        indicators.insert(ind.name().to_string(), ind.compute(bars));
    }

    let mut signals = vec![SignalKind::Hold; bars.len()];
    for i in 1..bars.len() {
        if let Some(bias) = blueprint.rule.evaluate(&indicators, bars, i) {
            let bias = if reverse { bias.flipped() } else { bias };
            signals[i] = match bias {
                Bias::Bullish => SignalKind::Buy(bars[i].low),
                Bias::Bearish => SignalKind::Sell(bars[i].high),
            };
        }
    }

    AnnotatedSeries {
        bars: bars.to_vec(),
        indicators,
        signals,
    }
}
