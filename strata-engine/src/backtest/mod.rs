//! Backtest orchestration: strategy run, trade simulation, aggregation.

pub mod simulator;
pub mod summary;

pub use simulator::{simulate, SimConfig};
pub use summary::{summarize, BacktestSummary};

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, Trade};
use crate::strategy::{
    run_consensus, AnnotatedSeries, ConsensusParams, RegistryError, StrategyParams,
    StrategyRegistry,
};

/// Which strategy a backtest run evaluates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyChoice {
    ById { id: String, params: StrategyParams },
    Consensus(ConsensusParams),
}

impl StrategyChoice {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::ById {
            id: id.into(),
            params: StrategyParams::default(),
        }
    }
}

/// Full configuration for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub choice: StrategyChoice,
    pub sim: SimConfig,
    pub initial_capital: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            choice: StrategyChoice::Consensus(ConsensusParams::default()),
            sim: SimConfig::default(),
            initial_capital: 10_000.0,
        }
    }
}

/// Everything a backtest run produces: the annotated series for charting,
/// the trade list, and the aggregate summary.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    pub annotated: AnnotatedSeries,
    pub trades: Vec<Trade>,
    pub summary: BacktestSummary,
}

/// Run a full backtest: annotate the bars with the chosen strategy, feed
/// them through the simulator, and fold the trades into a summary.
///
/// The only failure mode is an unknown strategy id; everything downstream
/// of the lookup degrades to empty output rather than erroring.
pub fn run_backtest(
    registry: &StrategyRegistry,
    bars: &[Bar],
    config: &BacktestConfig,
) -> Result<BacktestReport, RegistryError> {
    let annotated = match &config.choice {
        StrategyChoice::ById { id, params } => registry.calculate(id, bars, params)?,
        StrategyChoice::Consensus(params) => run_consensus(registry, bars, params),
    };

    let trades = simulate(&annotated, &config.sim);
    let summary = summarize(&trades, config.initial_capital);

    Ok(BacktestReport {
        annotated,
        trades,
        summary,
    })
}
