//! Per-bar signal annotation.
//!
//! Every strategy family (single-indicator, crossover, consensus) emits
//! this one closed type, and the trade simulator consumes it uniformly.

use serde::{Deserialize, Serialize};

/// Directional signal attached to a bar by a strategy.
///
/// `Buy`/`Sell` carry the trigger price: the bar's low for buys and the
/// bar's high for sells, matching the fill prices the simulator uses.
/// At most one directional signal exists per bar per strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "price", rename_all = "snake_case")]
pub enum SignalKind {
    #[default]
    Hold,
    Buy(f64),
    Sell(f64),
}

impl SignalKind {
    pub fn is_buy(&self) -> bool {
        matches!(self, Self::Buy(_))
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Self::Sell(_))
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }

    /// Trigger price for directional signals, `None` for `Hold`.
    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Buy(p) | Self::Sell(p) => Some(*p),
            Self::Hold => None,
        }
    }
}
