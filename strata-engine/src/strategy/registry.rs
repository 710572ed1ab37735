//! Strategy registry — the catalog of built-in strategies.
//!
//! Each entry binds an id, display metadata, default parameters, and a
//! blueprint builder that wires indicators to a `Rule`. Callers enumerate
//! strategies via `list()` and run one via `calculate()` without knowing
//! which indicators back it.

use std::collections::HashMap;

use crate::domain::Bar;
use crate::indicators::{
    sma::sma_of_series, AwesomeOscillator, Bollinger, Cci, Cmf, Coppock, Donchian, Ema, Ichimoku,
    IchimokuLine, Indicator, Keltner, Macd, Momentum, Obv, ParabolicSar, Pivot, PivotLevel, Rsi,
    Sma, Stochastic, Supertrend, Vwap, WilliamsR,
};

use super::params::StrategyParams;
use super::rule::{run_blueprint, AnnotatedSeries, Blueprint, Rule, CLOSE_SERIES};

/// Errors from registry lookups.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown strategy id: {0}")]
    UnknownStrategy(String),
}

/// Display metadata for a registered strategy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StrategyInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A registered strategy: metadata, defaults, and the blueprint builder.
pub struct StrategyDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    defaults: StrategyParams,
    build: fn(&StrategyParams) -> Blueprint,
}

impl StrategyDef {
    pub fn info(&self) -> StrategyInfo {
        StrategyInfo {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }

    /// The strategy's full default parameter set.
    pub fn default_params(&self) -> StrategyParams {
        self.defaults.clone()
    }

    /// Run the strategy: merge caller params over defaults, build the
    /// blueprint, scan. Never fails; insufficient data yields an
    /// unannotated copy.
    pub fn calculate(&self, bars: &[Bar], params: &StrategyParams) -> AnnotatedSeries {
        let merged = params.merged_over(&self.defaults);
        let blueprint = (self.build)(&merged);
        run_blueprint(bars, &blueprint, merged.reverse)
    }
}

/// The strategy catalog. Built once, shared by reference.
pub struct StrategyRegistry {
    defs: Vec<StrategyDef>,
    index: HashMap<&'static str, usize>,
}

impl StrategyRegistry {
    /// Registry with all built-in strategies.
    pub fn builtin() -> Self {
        let defs = builtin_defs();
        let index = defs
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id, i))
            .collect();
        Self { defs, index }
    }

    /// Enumerate all registered strategies.
    pub fn list(&self) -> Vec<StrategyInfo> {
        self.defs.iter().map(StrategyDef::info).collect()
    }

    pub fn get(&self, id: &str) -> Option<&StrategyDef> {
        self.index.get(id).map(|&i| &self.defs[i])
    }

    /// Default parameters for a strategy id.
    pub fn default_params(&self, id: &str) -> Result<StrategyParams, RegistryError> {
        self.get(id)
            .map(StrategyDef::default_params)
            .ok_or_else(|| RegistryError::UnknownStrategy(id.to_string()))
    }

    /// Run a strategy by id.
    pub fn calculate(
        &self,
        id: &str,
        bars: &[Bar],
        params: &StrategyParams,
    ) -> Result<AnnotatedSeries, RegistryError> {
        self.get(id)
            .map(|def| def.calculate(bars, params))
            .ok_or_else(|| RegistryError::UnknownStrategy(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─── Composed helper ─────────────────────────────────────────────────

/// SMA smoothing of another indicator's output (used for the OBV trend
/// line). Lookback: inner lookback + period - 1.
struct Smoothed {
    inner: Box<dyn Indicator>,
    period: usize,
    name: String,
}

impl Smoothed {
    fn new(inner: Box<dyn Indicator>, period: usize) -> Self {
        let name = format!("{}_sma_{period}", inner.name());
        Self {
            inner,
            period,
            name,
        }
    }
}

impl Indicator for Smoothed {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.inner.lookback() + self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        sma_of_series(&self.inner.compute(bars), self.period)
    }
}

// ─── Blueprint builders ──────────────────────────────────────────────
//
// Period constraints are clamped rather than asserted (a malformed caller
// param set must never panic a run): slow is forced above fast where the
// indicator requires it.

fn sorted_pair(fast: usize, slow: usize) -> (usize, usize) {
    if slow > fast {
        (fast, slow)
    } else {
        (slow.max(1), slow.max(1) + (fast - slow).max(1))
    }
}

fn build_sma_cross(p: &StrategyParams) -> Blueprint {
    let (fast, slow) = sorted_pair(p.period("fast_period", 10), p.period("slow_period", 50));
    let fast_ind = Sma::new(fast);
    let slow_ind = Sma::new(slow);
    let rule = Rule::CrossOver {
        fast: fast_ind.name().to_string(),
        slow: slow_ind.name().to_string(),
    };
    Blueprint::new(vec![Box::new(fast_ind), Box::new(slow_ind)], rule)
}

fn build_ema_cross(p: &StrategyParams) -> Blueprint {
    let (fast, slow) = sorted_pair(p.period("fast_period", 12), p.period("slow_period", 26));
    let fast_ind = Ema::new(fast);
    let slow_ind = Ema::new(slow);
    let rule = Rule::CrossOver {
        fast: fast_ind.name().to_string(),
        slow: slow_ind.name().to_string(),
    };
    Blueprint::new(vec![Box::new(fast_ind), Box::new(slow_ind)], rule)
}

fn build_macd_cross(p: &StrategyParams) -> Blueprint {
    let (fast, slow) = sorted_pair(p.period("fast_period", 12), p.period("slow_period", 26));
    let signal = p.period("signal_period", 9);
    let line = Macd::line(fast, slow, signal);
    let sig = Macd::signal(fast, slow, signal);
    let rule = Rule::CrossOver {
        fast: line.name().to_string(),
        slow: sig.name().to_string(),
    };
    Blueprint::new(vec![Box::new(line), Box::new(sig)], rule)
}

fn build_rsi_reversal(p: &StrategyParams) -> Blueprint {
    let rsi = Rsi::new(p.period("period", 14));
    let rule = Rule::BandRecross {
        series: rsi.name().to_string(),
        lower: p.value("oversold", 30.0),
        upper: p.value("overbought", 70.0),
    };
    Blueprint::new(vec![Box::new(rsi)], rule)
}

fn build_stochastic_cross(p: &StrategyParams) -> Blueprint {
    let k_period = p.period("k_period", 14);
    let d_period = p.period("d_period", 3);
    let k = Stochastic::k(k_period, d_period);
    let d = Stochastic::d(k_period, d_period);
    let rule = Rule::CrossOver {
        fast: k.name().to_string(),
        slow: d.name().to_string(),
    };
    Blueprint::new(vec![Box::new(k), Box::new(d)], rule)
}

fn build_bollinger_breakout(p: &StrategyParams) -> Blueprint {
    let period = p.period("period", 20);
    let mult = p.value("std_multiplier", 2.0);
    let upper = Bollinger::upper(period, mult);
    let lower = Bollinger::lower(period, mult);
    let middle = Bollinger::middle(period, mult);
    let rule = Rule::ChannelBreakout {
        upper: upper.name().to_string(),
        lower: lower.name().to_string(),
    };
    Blueprint::new(
        vec![Box::new(upper), Box::new(lower), Box::new(middle)],
        rule,
    )
}

fn build_donchian_breakout(p: &StrategyParams) -> Blueprint {
    let period = p.period("period", 20);
    let upper = Donchian::upper(period);
    let lower = Donchian::lower(period);
    let rule = Rule::ChannelBreakout {
        upper: upper.name().to_string(),
        lower: lower.name().to_string(),
    };
    Blueprint::new(vec![Box::new(upper), Box::new(lower)], rule)
}

fn build_keltner_breakout(p: &StrategyParams) -> Blueprint {
    let ema_period = p.period("ema_period", 20);
    let atr_period = p.period("atr_period", 10);
    let mult = p.value("multiplier", 1.5);
    let upper = Keltner::upper(ema_period, atr_period, mult);
    let lower = Keltner::lower(ema_period, atr_period, mult);
    let rule = Rule::ChannelBreakout {
        upper: upper.name().to_string(),
        lower: lower.name().to_string(),
    };
    Blueprint::new(vec![Box::new(upper), Box::new(lower)], rule)
}

fn build_supertrend_flip(p: &StrategyParams) -> Blueprint {
    let period = p.period("period", 10);
    let mult = p.value("multiplier", 3.0).max(f64::MIN_POSITIVE);
    let direction = Supertrend::direction(period, mult);
    let value = Supertrend::value(period, mult);
    let rule = Rule::DirectionFlip {
        series: direction.name().to_string(),
    };
    Blueprint::new(vec![Box::new(direction), Box::new(value)], rule)
}

fn build_psar_flip(p: &StrategyParams) -> Blueprint {
    let af_start = p.value("af_start", 0.02).max(1e-6);
    let af_step = p.value("af_step", 0.02).max(1e-6);
    let af_max = p.value("af_max", 0.20).max(af_start);
    let direction = ParabolicSar::direction(af_start, af_step, af_max);
    let value = ParabolicSar::value(af_start, af_step, af_max);
    let rule = Rule::DirectionFlip {
        series: direction.name().to_string(),
    };
    Blueprint::new(vec![Box::new(direction), Box::new(value)], rule)
}

fn build_cci_reversal(p: &StrategyParams) -> Blueprint {
    let cci = Cci::new(p.period("period", 20));
    let rule = Rule::BandRecross {
        series: cci.name().to_string(),
        lower: p.value("oversold", -100.0),
        upper: p.value("overbought", 100.0),
    };
    Blueprint::new(vec![Box::new(cci)], rule)
}

fn build_williams_reversal(p: &StrategyParams) -> Blueprint {
    let wr = WilliamsR::new(p.period("period", 14));
    let rule = Rule::BandRecross {
        series: wr.name().to_string(),
        lower: p.value("oversold", -80.0),
        upper: p.value("overbought", -20.0),
    };
    Blueprint::new(vec![Box::new(wr)], rule)
}

fn build_vwap_cross(_p: &StrategyParams) -> Blueprint {
    let vwap = Vwap::new();
    let rule = Rule::CrossOver {
        fast: CLOSE_SERIES.to_string(),
        slow: vwap.name().to_string(),
    };
    Blueprint::new(vec![Box::new(vwap)], rule)
}

fn build_ao_zero(p: &StrategyParams) -> Blueprint {
    let (fast, slow) = sorted_pair(p.period("fast_period", 5), p.period("slow_period", 34));
    let ao = AwesomeOscillator::new(fast, slow);
    let rule = Rule::LevelCross {
        series: ao.name().to_string(),
        level: 0.0,
    };
    Blueprint::new(vec![Box::new(ao)], rule)
}

fn build_momentum_zero(p: &StrategyParams) -> Blueprint {
    let momentum = Momentum::new(p.period("period", 10));
    let rule = Rule::LevelCross {
        series: momentum.name().to_string(),
        level: 0.0,
    };
    Blueprint::new(vec![Box::new(momentum)], rule)
}

fn build_coppock_zero(p: &StrategyParams) -> Blueprint {
    let (short, long) = sorted_pair(p.period("short_roc", 11), p.period("long_roc", 14));
    let coppock = Coppock::new(long, short, p.period("wma_period", 10));
    let rule = Rule::LevelCross {
        series: coppock.name().to_string(),
        level: 0.0,
    };
    Blueprint::new(vec![Box::new(coppock)], rule)
}

fn build_cmf_zero(p: &StrategyParams) -> Blueprint {
    let cmf = Cmf::new(p.period("period", 20));
    let rule = Rule::LevelCross {
        series: cmf.name().to_string(),
        level: 0.0,
    };
    Blueprint::new(vec![Box::new(cmf)], rule)
}

fn build_ichimoku_cross(p: &StrategyParams) -> Blueprint {
    let tenkan_period = p.period("tenkan", 9);
    let kijun_period = p.period("kijun", 26);
    let senkou_b = p.period("senkou_b", 52);
    let tenkan = Ichimoku::new(tenkan_period, kijun_period, senkou_b, IchimokuLine::Tenkan);
    let kijun = Ichimoku::new(tenkan_period, kijun_period, senkou_b, IchimokuLine::Kijun);
    let rule = Rule::CrossOver {
        fast: tenkan.name().to_string(),
        slow: kijun.name().to_string(),
    };
    Blueprint::new(vec![Box::new(tenkan), Box::new(kijun)], rule)
}

fn build_obv_trend(p: &StrategyParams) -> Blueprint {
    let obv = Obv::new();
    let trend_line = Smoothed::new(Box::new(Obv::new()), p.period("period", 20));
    let rule = Rule::CrossOver {
        fast: obv.name().to_string(),
        slow: trend_line.name().to_string(),
    };
    Blueprint::new(vec![Box::new(obv), Box::new(trend_line)], rule)
}

fn build_pivot_breakout(_p: &StrategyParams) -> Blueprint {
    let r1 = Pivot::new(PivotLevel::R1);
    let s1 = Pivot::new(PivotLevel::S1);
    let pp = Pivot::new(PivotLevel::Pp);
    let rule = Rule::ChannelBreakout {
        upper: r1.name().to_string(),
        lower: s1.name().to_string(),
    };
    Blueprint::new(vec![Box::new(r1), Box::new(s1), Box::new(pp)], rule)
}

fn builtin_defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            id: "sma_cross",
            name: "SMA Crossover",
            description: "Fast SMA crossing the slow SMA (golden/death cross)",
            defaults: StrategyParams::from_values([("fast_period", 10.0), ("slow_period", 50.0)]),
            build: build_sma_cross,
        },
        StrategyDef {
            id: "ema_cross",
            name: "EMA Crossover",
            description: "Fast EMA crossing the slow EMA",
            defaults: StrategyParams::from_values([("fast_period", 12.0), ("slow_period", 26.0)]),
            build: build_ema_cross,
        },
        StrategyDef {
            id: "macd_cross",
            name: "MACD Signal Cross",
            description: "MACD line crossing its signal line",
            defaults: StrategyParams::from_values([
                ("fast_period", 12.0),
                ("slow_period", 26.0),
                ("signal_period", 9.0),
            ]),
            build: build_macd_cross,
        },
        StrategyDef {
            id: "rsi_reversal",
            name: "RSI Reversal",
            description: "RSI re-entering from oversold/overbought bands",
            defaults: StrategyParams::from_values([
                ("period", 14.0),
                ("oversold", 30.0),
                ("overbought", 70.0),
            ]),
            build: build_rsi_reversal,
        },
        StrategyDef {
            id: "stochastic_cross",
            name: "Stochastic %K/%D Cross",
            description: "%K crossing %D",
            defaults: StrategyParams::from_values([("k_period", 14.0), ("d_period", 3.0)]),
            build: build_stochastic_cross,
        },
        StrategyDef {
            id: "bollinger_breakout",
            name: "Bollinger Breakout",
            description: "Close breaking out of the Bollinger bands",
            defaults: StrategyParams::from_values([("period", 20.0), ("std_multiplier", 2.0)]),
            build: build_bollinger_breakout,
        },
        StrategyDef {
            id: "donchian_breakout",
            name: "Donchian Breakout",
            description: "Close breaking the Donchian channel extremes",
            defaults: StrategyParams::from_values([("period", 20.0)]),
            build: build_donchian_breakout,
        },
        StrategyDef {
            id: "keltner_breakout",
            name: "Keltner Breakout",
            description: "Close breaking out of the Keltner channel",
            defaults: StrategyParams::from_values([
                ("ema_period", 20.0),
                ("atr_period", 10.0),
                ("multiplier", 1.5),
            ]),
            build: build_keltner_breakout,
        },
        StrategyDef {
            id: "supertrend_flip",
            name: "Supertrend Flip",
            description: "Supertrend direction changing sign",
            defaults: StrategyParams::from_values([("period", 10.0), ("multiplier", 3.0)]),
            build: build_supertrend_flip,
        },
        StrategyDef {
            id: "psar_flip",
            name: "Parabolic SAR Flip",
            description: "Parabolic SAR direction changing sign",
            defaults: StrategyParams::from_values([
                ("af_start", 0.02),
                ("af_step", 0.02),
                ("af_max", 0.20),
            ]),
            build: build_psar_flip,
        },
        StrategyDef {
            id: "cci_reversal",
            name: "CCI Reversal",
            description: "CCI re-entering from the ±100 bands",
            defaults: StrategyParams::from_values([
                ("period", 20.0),
                ("oversold", -100.0),
                ("overbought", 100.0),
            ]),
            build: build_cci_reversal,
        },
        StrategyDef {
            id: "williams_reversal",
            name: "Williams %R Reversal",
            description: "Williams %R re-entering from the -80/-20 bands",
            defaults: StrategyParams::from_values([
                ("period", 14.0),
                ("oversold", -80.0),
                ("overbought", -20.0),
            ]),
            build: build_williams_reversal,
        },
        StrategyDef {
            id: "vwap_cross",
            name: "VWAP Cross",
            description: "Close crossing the cumulative VWAP",
            defaults: StrategyParams::default(),
            build: build_vwap_cross,
        },
        StrategyDef {
            id: "ao_zero",
            name: "Awesome Oscillator Zero Cross",
            description: "AO crossing the zero line",
            defaults: StrategyParams::from_values([("fast_period", 5.0), ("slow_period", 34.0)]),
            build: build_ao_zero,
        },
        StrategyDef {
            id: "momentum_zero",
            name: "Momentum Zero Cross",
            description: "Momentum crossing the zero line",
            defaults: StrategyParams::from_values([("period", 10.0)]),
            build: build_momentum_zero,
        },
        StrategyDef {
            id: "coppock_zero",
            name: "Coppock Curve Zero Cross",
            description: "Coppock curve crossing the zero line",
            defaults: StrategyParams::from_values([
                ("long_roc", 14.0),
                ("short_roc", 11.0),
                ("wma_period", 10.0),
            ]),
            build: build_coppock_zero,
        },
        StrategyDef {
            id: "cmf_zero",
            name: "Chaikin Money Flow Zero Cross",
            description: "CMF crossing the zero line",
            defaults: StrategyParams::from_values([("period", 20.0)]),
            build: build_cmf_zero,
        },
        StrategyDef {
            id: "ichimoku_cross",
            name: "Ichimoku Tenkan/Kijun Cross",
            description: "Tenkan line crossing the Kijun line",
            defaults: StrategyParams::from_values([
                ("tenkan", 9.0),
                ("kijun", 26.0),
                ("senkou_b", 52.0),
            ]),
            build: build_ichimoku_cross,
        },
        StrategyDef {
            id: "obv_trend",
            name: "OBV Trend Cross",
            description: "OBV crossing its own moving average",
            defaults: StrategyParams::from_values([("period", 20.0)]),
            build: build_obv_trend,
        },
        StrategyDef {
            id: "pivot_breakout",
            name: "Pivot Level Breakout",
            description: "Close breaking through R1/S1 pivot levels",
            defaults: StrategyParams::default(),
            build: build_pivot_breakout,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalKind;
    use crate::indicators::make_bars;

    #[test]
    fn registry_lists_all_builtins() {
        let registry = StrategyRegistry::builtin();
        let infos = registry.list();
        assert_eq!(infos.len(), registry.len());
        assert!(infos.iter().any(|i| i.id == "sma_cross"));
        assert!(infos.iter().any(|i| i.id == "pivot_breakout"));
    }

    #[test]
    fn registry_ids_are_unique() {
        let registry = StrategyRegistry::builtin();
        let mut ids: Vec<_> = registry.list().iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = StrategyRegistry::builtin();
        let bars = make_bars(&[100.0, 101.0]);
        let err = registry
            .calculate("no_such_strategy", &bars, &StrategyParams::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownStrategy(_)));
    }

    #[test]
    fn every_builtin_handles_insufficient_data() {
        let registry = StrategyRegistry::builtin();
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        for info in registry.list() {
            let out = registry
                .calculate(info.id, &bars, &StrategyParams::default())
                .unwrap();
            assert_eq!(out.len(), bars.len(), "{} changed length", info.id);
        }
    }

    #[test]
    fn every_builtin_runs_on_real_sized_data() {
        let registry = StrategyRegistry::builtin();
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.25).sin() * 10.0 + i as f64 * 0.05)
            .collect();
        let bars = make_bars(&closes);
        for info in registry.list() {
            let out = registry
                .calculate(info.id, &bars, &StrategyParams::default())
                .unwrap();
            assert_eq!(out.len(), bars.len());
            // No bar may carry more than one directional signal by
            // construction; spot-check the annotation alignment instead.
            assert_eq!(out.signals.len(), out.bars.len());
        }
    }

    #[test]
    fn sma_cross_emits_signals_on_oscillating_data() {
        let registry = StrategyRegistry::builtin();
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.4).sin() * 15.0)
            .collect();
        let bars = make_bars(&closes);
        let params = StrategyParams::from_values([("fast_period", 3.0), ("slow_period", 8.0)]);
        let out = registry.calculate("sma_cross", &bars, &params).unwrap();
        assert!(out.signal_count() > 0, "oscillating data must cross");
        assert!(out.indicators.get_series("sma_3").is_some());
        assert!(out.indicators.get_series("sma_8").is_some());
    }

    #[test]
    fn reversed_params_swap_buy_and_sell() {
        let registry = StrategyRegistry::builtin();
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.4).sin() * 15.0)
            .collect();
        let bars = make_bars(&closes);
        let params = StrategyParams::from_values([("fast_period", 3.0), ("slow_period", 8.0)]);
        let mut reversed_params = params.clone();
        reversed_params.reverse = true;

        let normal = registry.calculate("sma_cross", &bars, &params).unwrap();
        let reversed = registry
            .calculate("sma_cross", &bars, &reversed_params)
            .unwrap();
        for i in 0..bars.len() {
            match (normal.signals[i], reversed.signals[i]) {
                (SignalKind::Buy(_), other) => assert!(other.is_sell()),
                (SignalKind::Sell(_), other) => assert!(other.is_buy()),
                (SignalKind::Hold, other) => assert!(other.is_hold()),
            }
        }
    }

    #[test]
    fn malformed_period_order_does_not_panic() {
        let registry = StrategyRegistry::builtin();
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 0.1).collect();
        let bars = make_bars(&closes);
        // fast > slow: the builder sorts rather than panicking.
        let params = StrategyParams::from_values([("fast_period", 50.0), ("slow_period", 10.0)]);
        let out = registry.calculate("sma_cross", &bars, &params).unwrap();
        assert_eq!(out.len(), bars.len());
    }

    #[test]
    fn determinism_identical_inputs_identical_outputs() {
        let registry = StrategyRegistry::builtin();
        let closes: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.3).cos() * 8.0)
            .collect();
        let bars = make_bars(&closes);
        let params = StrategyParams::default();
        let a = registry.calculate("macd_cross", &bars, &params).unwrap();
        let b = registry.calculate("macd_cross", &bars, &params).unwrap();
        assert_eq!(a.signals, b.signals);
        assert_eq!(a.indicators, b.indicators);
    }
}
