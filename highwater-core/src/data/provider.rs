//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, Nasdaq,
//! Stooq, in-memory fixtures) so the pipeline can run against either live source
//! and against canned data in tests.

use crate::domain::{PriceBasis, PriceSeries, ProviderId};
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
///
/// Every variant means the provider could not deliver a usable series.
/// None of them are retried.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("provider refused the request: {0}")]
    Forbidden(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market data providers.
///
/// Implementations handle the transport and wire format of one source and
/// return closing prices only. Sorting, range clipping and deduplication are
/// applied by the fetch layer above this trait.
pub trait DataProvider {
    /// Which source this provider talks to.
    fn id(&self) -> ProviderId;

    /// Adjustment basis of the returned closes.
    fn basis(&self) -> PriceBasis {
        self.id().basis()
    }

    /// Fetch daily closing prices for a symbol over an inclusive date range.
    fn fetch_daily_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;
}
