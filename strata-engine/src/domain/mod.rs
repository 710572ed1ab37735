//! Domain types: bars, price points, signals, trades.

pub mod bar;
pub mod signal;
pub mod trade;

pub use bar::{Bar, PricePoint};
pub use signal::SignalKind;
pub use trade::{CloseReason, Trade};
