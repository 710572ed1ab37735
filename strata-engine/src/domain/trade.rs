//! Trade — a completed round-trip with entry, exit, and close reason.

use serde::{Deserialize, Serialize};

/// Why a position was closed.
///
/// `EndOfData` marks the forced liquidation when the bar sequence ends with
/// a position still open; the separate variant keeps "real sell signal"
/// and "ran out of data" distinguishable in trade lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloseReason {
    StopLoss,
    TakeProfit,
    Signal,
    EndOfData,
}

/// A complete round-trip trade: entry → exit.
///
/// Immutable once created; appended to the simulator's ordered trade list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Entry bar timestamp, epoch milliseconds.
    pub entry_time: i64,
    pub entry_price: f64,
    /// Exit bar timestamp, epoch milliseconds. Never before `entry_time`.
    pub exit_time: i64,
    pub exit_price: f64,
    /// Absolute PnL per unit: exit_price - entry_price.
    pub pnl: f64,
    /// PnL as a percentage of the entry price.
    pub pnl_percent: f64,
    pub close_reason: CloseReason,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
