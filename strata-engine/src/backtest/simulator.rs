//! Trade simulator: a single-position long-only state machine.
//!
//! One left-to-right scan over the signal-annotated bars. While a position
//! is open, exits are checked in strict priority: stop-loss, then
//! take-profit, then sell signal — at most one exit per bar. A buy signal
//! on a bar where the position just closed re-opens on that same bar. A
//! position still open when the data ends is liquidated at the last bar's
//! close with the distinct `end-of-data` reason.

use crate::domain::{Bar, CloseReason, SignalKind, Trade};
use crate::strategy::AnnotatedSeries;

/// Exit thresholds, expressed as percentages of the entry price.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub stop_loss_percent: f64,
    pub take_profit_percent: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            stop_loss_percent: 5.0,
            take_profit_percent: 10.0,
        }
    }
}

/// An open position. Exists only inside the scan.
struct Position {
    entry_time: i64,
    entry_price: f64,
    stop_loss_price: f64,
    take_profit_price: f64,
}

impl Position {
    fn open(bar: &Bar, entry_price: f64, config: &SimConfig) -> Self {
        Self {
            entry_time: bar.time,
            entry_price,
            stop_loss_price: entry_price * (1.0 - config.stop_loss_percent / 100.0),
            take_profit_price: entry_price * (1.0 + config.take_profit_percent / 100.0),
        }
    }

    fn close(self, exit_time: i64, exit_price: f64, close_reason: CloseReason) -> Trade {
        let pnl = exit_price - self.entry_price;
        Trade {
            entry_time: self.entry_time,
            entry_price: self.entry_price,
            exit_time,
            exit_price,
            pnl,
            pnl_percent: pnl / self.entry_price * 100.0,
            close_reason,
        }
    }
}

/// Run the simulator over an annotated series and return completed trades
/// in entry order.
pub fn simulate(annotated: &AnnotatedSeries, config: &SimConfig) -> Vec<Trade> {
    let mut trades = Vec::new();
    let mut position: Option<Position> = None;

    for (bar, signal) in annotated.bars.iter().zip(&annotated.signals) {
        // Exit checks come before entries, so a position opened on this
        // bar is first exposed to its stop on the next one.
        if let Some(open) = position.take() {
            if bar.low <= open.stop_loss_price {
                let stop = open.stop_loss_price;
                trades.push(open.close(bar.time, stop, CloseReason::StopLoss));
            } else if bar.high >= open.take_profit_price {
                let target = open.take_profit_price;
                trades.push(open.close(bar.time, target, CloseReason::TakeProfit));
            } else if let SignalKind::Sell(price) = signal {
                trades.push(open.close(bar.time, *price, CloseReason::Signal));
            } else {
                position = Some(open);
            }
        }

        if position.is_none() {
            if let SignalKind::Buy(price) = signal {
                position = Some(Position::open(bar, *price, config));
            }
        }
    }

    if let Some(open) = position {
        if let Some(last) = annotated.bars.last() {
            trades.push(open.close(last.time, last.close, CloseReason::EndOfData));
        }
    }

    trades
}
