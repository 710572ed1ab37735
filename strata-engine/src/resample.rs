//! Bar resampler — aggregates raw price points into fixed-interval OHLCV bars.
//!
//! Points are bucketed by `floor(time / interval_ms) * interval_ms`. Within
//! a bucket, open/close follow the original input order (callers feeding
//! unsorted data must pre-sort), high/low are the bucket extremes, and
//! volume is the bucket sum rounded to 2 decimals. Output is always sorted
//! ascending by bucket timestamp.

use std::collections::BTreeMap;

use crate::domain::{Bar, PricePoint};

const MILLIS_PER_MINUTE: i64 = 60_000;

struct Bucket {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Aggregate `points` into `interval_minutes`-wide OHLCV bars.
///
/// Returns an empty vector for empty input or a zero interval. A bucket
/// holding a single point produces a zero-range bar (open=high=low=close).
pub fn resample(points: &[PricePoint], interval_minutes: u32) -> Vec<Bar> {
    if points.is_empty() || interval_minutes == 0 {
        return Vec::new();
    }

    let interval_ms = interval_minutes as i64 * MILLIS_PER_MINUTE;
    let mut buckets: BTreeMap<i64, Bucket> = BTreeMap::new();

    for point in points {
        let bucket_time = point.time.div_euclid(interval_ms) * interval_ms;
        buckets
            .entry(bucket_time)
            .and_modify(|b| {
                b.high = b.high.max(point.price);
                b.low = b.low.min(point.price);
                b.close = point.price;
                b.volume += point.volume;
            })
            .or_insert(Bucket {
                open: point.price,
                high: point.price,
                low: point.price,
                close: point.price,
                volume: point.volume,
            });
    }

    // BTreeMap iteration yields ascending bucket timestamps.
    buckets
        .into_iter()
        .map(|(time, b)| Bar {
            time,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: round2(b.volume),
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
