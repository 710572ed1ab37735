//! Performance aggregation over a completed trade list.

use crate::domain::Trade;

/// Aggregate statistics for one backtest run.
///
/// `profit_factor` is `+∞` when there are trades but no losing ones;
/// `total_return_percent` substitutes 1 for a zero initial capital so the
/// ratio stays finite (the result is then a raw PnL figure rather than a
/// true percentage).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BacktestSummary {
    pub total_trades: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub profit_factor: f64,
    pub initial_capital: f64,
    pub ending_balance: f64,
    pub total_return_percent: f64,
}

/// Fold a trade list into a `BacktestSummary`. Always returns a
/// well-formed summary; an empty trade list yields zeros.
pub fn summarize(trades: &[Trade], initial_capital: f64) -> BacktestSummary {
    let total_trades = trades.len();
    let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();

    // Winners are strictly positive; break-even trades count as losses.
    let wins: Vec<f64> = trades.iter().map(|t| t.pnl).filter(|&p| p > 0.0).collect();
    let losses: Vec<f64> = trades.iter().map(|t| t.pnl).filter(|&p| p <= 0.0).collect();

    let win_rate = if total_trades > 0 {
        wins.len() as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };

    let total_wins: f64 = wins.iter().sum();
    let total_losses: f64 = losses.iter().sum();

    let average_win = if wins.is_empty() {
        0.0
    } else {
        total_wins / wins.len() as f64
    };
    let average_loss = if losses.is_empty() {
        0.0
    } else {
        total_losses / losses.len() as f64
    };

    let profit_factor = if total_trades == 0 {
        0.0
    } else if total_losses == 0.0 {
        f64::INFINITY
    } else {
        (total_wins / total_losses).abs()
    };

    let ending_balance = initial_capital + total_pnl;
    let total_return_percent = total_pnl / initial_capital.max(1.0) * 100.0;

    BacktestSummary {
        total_trades,
        win_rate,
        total_pnl,
        average_win,
        average_loss,
        profit_factor,
        initial_capital,
        ending_balance,
        total_return_percent,
    }
}
