//! Highwater Core: domain types, data providers, gap validation, rolling-max signal.
//!
//! This crate holds everything the pipeline needs for a single provider:
//! - Domain types (price points, price series, provider identifiers)
//! - Injected clock for "today"
//! - Data provider trait with Yahoo Finance, Nasdaq, Stooq, and in-memory sources
//! - Fetch window policy (cutoff hour, 3650-day lookback)
//! - Per-year gap validator
//! - Rolling maximum indicator and the signal derived from it

pub mod clock;
pub mod data;
pub mod domain;
pub mod gaps;
pub mod indicators;
pub mod signal;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{PriceBasis, PricePoint, PriceSeries, ProviderId, SeriesError};
pub use gaps::{GapError, GapValidator};
pub use signal::{compute_signal, InvalidSignal, Signal, SignalRow, SignalSeries};
