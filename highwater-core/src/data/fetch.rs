//! Fetch window policy and the provider-agnostic fetch step.
//!
//! The window ends on the most recent completed session: before the cutoff
//! hour the current day's close is not final yet, so the window ends the day
//! before. The start is a fixed number of calendar days before the end.

use super::provider::{DataError, DataProvider};
use crate::clock::Clock;
use crate::domain::PriceSeries;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Default lookback: ten years of calendar days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 3650;

/// Local hour from which today's close counts as final.
pub const DEFAULT_CUTOFF_HOUR: u32 = 17;

/// Inclusive date range requested from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    pub fn ending_at(now: NaiveDateTime, cutoff_hour: u32, lookback_days: i64) -> Self {
        let today = now.date();
        let end = if now.hour() < cutoff_hour {
            today - Duration::days(1)
        } else {
            today
        };
        Self {
            start: end - Duration::days(lookback_days),
            end,
        }
    }

    /// Window with the default cutoff and lookback, anchored on `clock`.
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::ending_at(clock.now(), DEFAULT_CUTOFF_HOUR, DEFAULT_LOOKBACK_DAYS)
    }
}

/// Fetch closing prices for `symbol` over `window` and canonicalize them.
///
/// The result is sorted ascending, deduplicated, limited to the window, and
/// free of non-finite closes. An empty result is an error.
pub fn fetch_close_series(
    provider: &dyn DataProvider,
    symbol: &str,
    window: FetchWindow,
) -> Result<PriceSeries, DataError> {
    let raw = provider.fetch_daily_close(symbol, window.start, window.end)?;
    let fetched = raw.len();

    let points = raw
        .points()
        .iter()
        .filter(|p| p.close.is_finite())
        .filter(|p| p.date >= window.start && p.date <= window.end)
        .copied()
        .collect();
    let series = PriceSeries::from_unsorted(symbol, provider.id(), points);

    if series.is_empty() {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
            start: window.start,
            end: window.end,
        });
    }

    tracing::info!(
        provider = %provider.id(),
        symbol,
        start = %window.start,
        end = %window.end,
        fetched,
        kept = series.len(),
        "fetched daily closes"
    );

    Ok(series)
}
