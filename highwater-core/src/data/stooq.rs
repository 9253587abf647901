//! Stooq data provider.
//!
//! Downloads the daily history CSV (`Date,Open,High,Low,Close,Volume`) and
//! keeps the `Close` column. US listings live under the `.us` suffix.
//!
//! Stooq back-adjusts its history for cash dividends, so these closes do not
//! match a printed-close source before each ex-dividend date.

use super::http;
use super::provider::{DataError, DataProvider};
use crate::domain::{PricePoint, PriceSeries, ProviderId};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StooqRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Close")]
    close: Option<f64>,
}

/// Stooq data provider.
pub struct StooqProvider {
    client: reqwest::blocking::Client,
}

impl StooqProvider {
    pub fn new() -> Result<Self, DataError> {
        Ok(Self {
            client: http::build_client()?,
        })
    }

    /// Map a plain ticker to Stooq's market-suffixed form.
    fn stooq_symbol(symbol: &str) -> String {
        let lower = symbol.to_ascii_lowercase();
        if lower.contains('.') {
            lower
        } else {
            format!("{lower}.us")
        }
    }

    fn csv_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "https://stooq.com/q/d/l/?s={}&d1={}&d2={}&i=d",
            Self::stooq_symbol(symbol),
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        )
    }

    /// Parse a CSV download into closing prices.
    ///
    /// Stooq answers unknown symbols and empty ranges with a bare `No data`
    /// body rather than an HTTP error.
    pub(crate) fn parse_csv(symbol: &str, body: &str) -> Result<Vec<PricePoint>, DataError> {
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("no data") {
            return Ok(Vec::new());
        }
        if trimmed.starts_with("Exceeded the daily hits limit") {
            return Err(DataError::Forbidden(format!(
                "stooq daily request limit exceeded for {symbol}"
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(trimmed.as_bytes());

        let headers = reader.headers().map_err(|e| {
            DataError::ResponseFormatChanged(format!("unreadable CSV header for {symbol}: {e}"))
        })?;
        if !headers.iter().any(|h| h == "Date") || !headers.iter().any(|h| h == "Close") {
            return Err(DataError::ResponseFormatChanged(format!(
                "missing Date/Close columns for {symbol}: {headers:?}"
            )));
        }

        let mut points = Vec::new();
        for (line, record) in reader.deserialize::<StooqRow>().enumerate() {
            let row = record.map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "bad CSV row {} for {symbol}: {e}",
                    line + 2
                ))
            })?;
            if let Some(close) = row.close {
                points.push(PricePoint::new(row.date, close));
            }
        }

        Ok(points)
    }
}

impl DataProvider for StooqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Stooq
    }

    fn fetch_daily_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = Self::csv_url(symbol, start, end);
        tracing::debug!(provider = "stooq", %url, "requesting CSV");

        let body = http::get(&self.client, &url, symbol)?
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let points = Self::parse_csv(symbol, &body)?;
        Ok(PriceSeries::from_unsorted(symbol, ProviderId::Stooq, points))
    }
}
