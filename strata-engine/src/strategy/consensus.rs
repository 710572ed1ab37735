//! Consensus strategy: run several member strategies and vote per bar.
//!
//! Each member contributes one vote per bar (buy, sell, or abstain via
//! hold). A strict majority of cast votes wins the bar; ties — including
//! the all-abstain case — produce no signal. Members run with their own
//! defaults so the vote reflects each strategy's canonical tuning.

use rayon::prelude::*;

use crate::domain::{Bar, SignalKind};

use super::params::StrategyParams;
use super::registry::StrategyRegistry;
use super::rule::AnnotatedSeries;

/// Member ids used when the caller does not pick any.
pub const DEFAULT_MEMBERS: [&str; 5] = [
    "sma_cross",
    "macd_cross",
    "rsi_reversal",
    "supertrend_flip",
    "bollinger_breakout",
];

/// Vote-count series names injected into the consensus output.
pub const BUY_VOTES_SERIES: &str = "buy_votes";
pub const SELL_VOTES_SERIES: &str = "sell_votes";

/// Parameters for a consensus run.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    /// Member strategy ids. Empty means `DEFAULT_MEMBERS`.
    pub strategy_ids: Vec<String>,
    /// Flags applied to the consensus outcome itself (`reverse` flips the
    /// winning side after the vote; member runs are never reversed).
    pub base: StrategyParams,
}

impl ConsensusParams {
    pub fn with_members<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strategy_ids: ids.into_iter().map(Into::into).collect(),
            base: StrategyParams::default(),
        }
    }

    fn member_ids(&self) -> Vec<&str> {
        if self.strategy_ids.is_empty() {
            DEFAULT_MEMBERS.to_vec()
        } else {
            self.strategy_ids.iter().map(String::as_str).collect()
        }
    }
}

/// Run the consensus vote over `bars`.
///
/// Unknown member ids are logged and skipped rather than failing the run;
/// a member that panics forfeits its vote the same way. With no usable
/// members the output carries zero vote counts and all-hold signals.
pub fn run_consensus(
    registry: &StrategyRegistry,
    bars: &[Bar],
    params: &ConsensusParams,
) -> AnnotatedSeries {
    let member_ids = params.member_ids();

    let member_signals: Vec<Vec<SignalKind>> = member_ids
        .par_iter()
        .filter_map(|id| {
            let Some(def) = registry.get(id) else {
                log::warn!("consensus: skipping unknown member strategy {id:?}");
                return None;
            };
            let defaults = def.default_params();
            let run = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                def.calculate(bars, &defaults)
            }));
            match run {
                Ok(annotated) => Some(annotated.signals),
                Err(_) => {
                    log::warn!("consensus: member strategy {id:?} panicked, vote forfeited");
                    None
                }
            }
        })
        .collect();

    tally_votes(&member_signals, bars, params.base.reverse)
}

/// Combine member signal vectors into the consensus output: count buy and
/// sell votes per bar, let a strict majority win, and hold on any tie
/// (a 1-1 split counts the same as no votes at all).
fn tally_votes(
    member_signals: &[Vec<SignalKind>],
    bars: &[Bar],
    reverse: bool,
) -> AnnotatedSeries {
    let mut out = AnnotatedSeries::unannotated(bars);
    let mut buy_votes = vec![0.0; bars.len()];
    let mut sell_votes = vec![0.0; bars.len()];

    for i in 0..bars.len() {
        let mut buys = 0usize;
        let mut sells = 0usize;
        for signals in member_signals {
            match signals[i] {
                SignalKind::Buy(_) => buys += 1,
                SignalKind::Sell(_) => sells += 1,
                SignalKind::Hold => {}
            }
        }
        buy_votes[i] = buys as f64;
        sell_votes[i] = sells as f64;

        let mut winner = if buys > sells {
            SignalKind::Buy(bars[i].low)
        } else if sells > buys {
            SignalKind::Sell(bars[i].high)
        } else {
            SignalKind::Hold
        };
        if reverse {
            winner = match winner {
                SignalKind::Buy(_) => SignalKind::Sell(bars[i].high),
                SignalKind::Sell(_) => SignalKind::Buy(bars[i].low),
                SignalKind::Hold => SignalKind::Hold,
            };
        }
        out.signals[i] = winner;
    }

    out.indicators.insert(BUY_VOTES_SERIES, buy_votes);
    out.indicators.insert(SELL_VOTES_SERIES, sell_votes);
    out
}
