//! Strata Engine — bar resampling, indicators, strategy signals, backtesting.
//!
//! This crate contains the signal and backtest core:
//! - Domain types (price points, bars, signals, trades)
//! - Tick-to-bar resampler with fixed-interval bucketing
//! - Indicator library (moving averages, oscillators, channels, volume)
//! - Rule-driven strategy blueprints and the built-in strategy registry
//! - Consensus strategy with per-bar majority voting
//! - Long-only single-position trade simulator and performance aggregator

pub mod backtest;
pub mod domain;
pub mod indicators;
pub mod resample;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types handed across worker threads are
    /// Send + Sync. The consensus strategy fans sub-strategy runs out
    /// over a thread pool, so a regression here breaks the build early.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::SignalKind>();
        require_sync::<domain::SignalKind>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::CloseReason>();
        require_sync::<domain::CloseReason>();

        // Strategy types
        require_send::<strategy::StrategyParams>();
        require_sync::<strategy::StrategyParams>();
        require_send::<strategy::ConsensusParams>();
        require_sync::<strategy::ConsensusParams>();
        require_send::<strategy::AnnotatedSeries>();
        require_sync::<strategy::AnnotatedSeries>();
        require_send::<strategy::StrategyRegistry>();
        require_sync::<strategy::StrategyRegistry>();

        // Backtest types
        require_send::<backtest::SimConfig>();
        require_sync::<backtest::SimConfig>();
        require_send::<backtest::BacktestSummary>();
        require_sync::<backtest::BacktestSummary>();
        require_send::<backtest::BacktestReport>();
        require_sync::<backtest::BacktestReport>();
    }
}
