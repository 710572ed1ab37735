//! Criterion benchmarks for Strata hot paths.
//!
//! Benchmarks:
//! 1. Tick resampling into fixed-interval bars
//! 2. Indicator batch computation (SMA, EMA, RSI, ATR, Bollinger)
//! 3. Single-strategy annotation (full blueprint run)
//! 4. Consensus vote over the default member set
//! 5. Full backtest (annotation, simulation, aggregation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use strata_engine::backtest::{run_backtest, BacktestConfig, StrategyChoice};
use strata_engine::domain::{Bar, PricePoint};
use strata_engine::indicators::{Atr, Bollinger, Ema, Indicator, Rsi, Sma};
use strata_engine::resample::resample;
use strata_engine::strategy::{run_consensus, ConsensusParams, StrategyParams, StrategyRegistry};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_points(n: usize) -> Vec<PricePoint> {
    (0..n)
        .map(|i| PricePoint {
            time: i as i64 * 7_000,
            price: 100.0 + (i as f64 * 0.05).sin() * 10.0,
            volume: 1.5,
        })
        .collect()
}

fn make_bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                time: i as i64 * 60_000,
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

// ── 1. Resampler ─────────────────────────────────────────────────────

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    for n in [1_000usize, 10_000, 100_000] {
        let points = make_points(n);
        group.bench_with_input(BenchmarkId::new("ticks", n), &points, |b, points| {
            b.iter(|| resample(black_box(points), 5));
        });
    }
    group.finish();
}

// ── 2. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let bars = make_bars(10_000);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(20)),
        Box::new(Ema::new(20)),
        Box::new(Rsi::new(14)),
        Box::new(Atr::new(14)),
        Box::new(Bollinger::upper(20, 2.0)),
    ];
    c.bench_function("indicators/batch_10k", |b| {
        b.iter(|| {
            for indicator in &indicators {
                black_box(indicator.compute(black_box(&bars)));
            }
        });
    });
}

// ── 3. Single strategy ───────────────────────────────────────────────

fn bench_strategy(c: &mut Criterion) {
    let registry = StrategyRegistry::builtin();
    let bars = make_bars(10_000);
    let params = StrategyParams::default();
    c.bench_function("strategy/macd_cross_10k", |b| {
        b.iter(|| {
            registry
                .calculate("macd_cross", black_box(&bars), &params)
                .unwrap()
        });
    });
}

// ── 4. Consensus ─────────────────────────────────────────────────────

fn bench_consensus(c: &mut Criterion) {
    let registry = StrategyRegistry::builtin();
    let bars = make_bars(10_000);
    let params = ConsensusParams::default();
    c.bench_function("consensus/default_members_10k", |b| {
        b.iter(|| run_consensus(&registry, black_box(&bars), &params));
    });
}

// ── 5. Full backtest ─────────────────────────────────────────────────

fn bench_backtest(c: &mut Criterion) {
    let registry = StrategyRegistry::builtin();
    let bars = make_bars(10_000);
    let config = BacktestConfig {
        choice: StrategyChoice::by_id("sma_cross"),
        ..BacktestConfig::default()
    };
    c.bench_function("backtest/sma_cross_10k", |b| {
        b.iter(|| run_backtest(&registry, black_box(&bars), &config).unwrap());
    });
}

criterion_group!(
    benches,
    bench_resample,
    bench_indicators,
    bench_strategy,
    bench_consensus,
    bench_backtest
);
criterion_main!(benches);
