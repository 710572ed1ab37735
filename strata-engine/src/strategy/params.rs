//! Strategy parameters and risk-governance (discipline) configuration.
//!
//! Callers supply partial parameter maps; strategies merge them over their
//! built-in defaults before use, so a missing or extra key never fails a
//! run. Discipline limits are accepted and carried for outer runners but
//! are NOT enforced by the trade simulator — see the `discipline` field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-strategy configuration.
///
/// `values` holds the numeric periods/thresholds keyed by parameter name
/// (`BTreeMap` for deterministic ordering during serialization). `reverse`
/// swaps the buy/sell outcome of every rule evaluation as a pure
/// postprocessing flip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub values: BTreeMap<String, f64>,
    pub reverse: bool,
    pub discipline: DisciplineParams,
}

impl StrategyParams {
    /// Construct params from (name, value) pairs, with default flags.
    pub fn from_values<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, f64)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            ..Self::default()
        }
    }

    /// Numeric parameter lookup with fallback.
    pub fn value(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    /// Period lookup: values are stored as f64 but consumed as bar counts.
    /// Clamped to >= 1 so a malformed zero/negative period cannot panic an
    /// indicator constructor.
    pub fn period(&self, name: &str, default: usize) -> usize {
        self.values
            .get(name)
            .map(|&v| if v >= 1.0 { v as usize } else { 1 })
            .unwrap_or(default)
    }

    /// Merge these (caller-supplied, possibly partial) params over a
    /// strategy's defaults. Caller values win; missing keys fall back to
    /// the defaults. `reverse` and `discipline` come from the caller.
    pub fn merged_over(&self, defaults: &StrategyParams) -> StrategyParams {
        let mut values = defaults.values.clone();
        for (k, v) in &self.values {
            values.insert(k.clone(), *v);
        }
        StrategyParams {
            values,
            reverse: self.reverse,
            discipline: self.discipline.clone(),
        }
    }
}

/// What an outer runner should do when a discipline limit trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    /// Suspend trading for the cooldown period, then resume.
    #[default]
    Pause,
    /// Stop the run entirely.
    Halt,
}

/// Risk-governance limits threaded through configuration.
///
/// The engine accepts and preserves these values but the trade simulator
/// does not consult them; enforcement belongs to an outer runner that
/// watches completed trades. Kept here so strategy configurations
/// round-trip without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisciplineParams {
    pub enable_discipline: bool,
    pub max_consecutive_losses: u32,
    pub cooldown_period_minutes: u32,
    pub daily_drawdown_limit: f64,
    pub on_failure: OnFailure,
}

impl Default for DisciplineParams {
    fn default() -> Self {
        Self {
            enable_discipline: false,
            max_consecutive_losses: 3,
            cooldown_period_minutes: 60,
            daily_drawdown_limit: 5.0,
            on_failure: OnFailure::Pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_params_merge_over_defaults() {
        let defaults = StrategyParams::from_values([("fast_period", 10.0), ("slow_period", 50.0)]);
        let caller = StrategyParams::from_values([("fast_period", 5.0)]);
        let merged = caller.merged_over(&defaults);
        assert_eq!(merged.value("fast_period", 0.0), 5.0);
        assert_eq!(merged.value("slow_period", 0.0), 50.0);
    }

    #[test]
    fn reverse_flag_comes_from_caller() {
        let defaults = StrategyParams::default();
        let mut caller = StrategyParams::default();
        caller.reverse = true;
        assert!(caller.merged_over(&defaults).reverse);
    }

    #[test]
    fn period_clamps_to_one() {
        let params = StrategyParams::from_values([("period", -3.0)]);
        assert_eq!(params.period("period", 14), 1);
        assert_eq!(params.period("missing", 14), 14);
    }

    #[test]
    fn params_deserialize_with_defaults() {
        // A completely empty object is valid: everything defaults.
        let params: StrategyParams = serde_json::from_str("{}").unwrap();
        assert!(params.values.is_empty());
        assert!(!params.reverse);
        assert!(!params.discipline.enable_discipline);
    }

    #[test]
    fn discipline_roundtrip() {
        let d = DisciplineParams {
            enable_discipline: true,
            max_consecutive_losses: 5,
            cooldown_period_minutes: 120,
            daily_drawdown_limit: 2.5,
            on_failure: OnFailure::Halt,
        };
        let json = serde_json::to_string(&d).unwrap();
        let deser: DisciplineParams = serde_json::from_str(&json).unwrap();
        assert_eq!(d, deser);
    }
}
