//! Nasdaq data provider.
//!
//! Reads the historical quotes endpoint behind nasdaq.com. The `Close/Last`
//! column holds printed closes, the same basis as Yahoo's chart `close`, so
//! the two can be reconciled to the cent. Rows arrive newest first with
//! US-style dates and price strings that may carry a `$` prefix.

use super::http;
use super::provider::{DataError, DataProvider};
use crate::domain::{PricePoint, PriceSeries, ProviderId};
use chrono::NaiveDate;
use serde::Deserialize;

const ROW_LIMIT: u32 = 9999;

#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    data: Option<HistoricalData>,
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct HistoricalData {
    #[serde(rename = "tradesTable")]
    trades_table: Option<TradesTable>,
}

#[derive(Debug, Deserialize)]
struct TradesTable {
    rows: Option<Vec<TradeRow>>,
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    date: String,
    close: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(rename = "rCode")]
    r_code: Option<u16>,
    #[serde(rename = "bCodeMessage")]
    messages: Option<Vec<StatusMessage>>,
}

#[derive(Debug, Deserialize)]
struct StatusMessage {
    #[serde(rename = "errorMessage")]
    error_message: String,
}

/// Nasdaq data provider.
pub struct NasdaqProvider {
    client: reqwest::blocking::Client,
}

impl NasdaqProvider {
    pub fn new() -> Result<Self, DataError> {
        Ok(Self {
            client: http::build_client()?,
        })
    }

    fn historical_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "https://api.nasdaq.com/api/quote/{}/historical\
             ?assetclass=etf&fromdate={}&todate={}&limit={ROW_LIMIT}",
            symbol.to_ascii_uppercase(),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        )
    }

    /// Parse a `$1,234.56`-style price string.
    fn parse_price(raw: &str) -> Option<f64> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '$' && *c != ',')
            .collect();
        cleaned.parse().ok()
    }

    /// Parse a historical-quotes body into closing prices.
    ///
    /// Unknown symbols come back as HTTP 200 with `data: null` and an error
    /// message in the status block. Rows with an unreadable close are
    /// skipped; an unreadable date means the format changed.
    pub(crate) fn parse_response(symbol: &str, body: &str) -> Result<Vec<PricePoint>, DataError> {
        let resp: HistoricalResponse = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let Some(data) = resp.data else {
            let status = resp.status;
            let message = status
                .as_ref()
                .and_then(|s| s.messages.as_ref())
                .and_then(|m| m.first())
                .map(|m| m.error_message.clone())
                .unwrap_or_default();
            if message.to_ascii_lowercase().contains("symbol not exist") {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            let code = status.and_then(|s| s.r_code).unwrap_or_default();
            return Err(DataError::ResponseFormatChanged(format!(
                "no data block for {symbol} (status {code}): {message}"
            )));
        };

        // an empty range has a table with `rows: null`, or no table at all
        let rows = data
            .trades_table
            .and_then(|t| t.rows)
            .unwrap_or_default();

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            let date = NaiveDate::parse_from_str(row.date.trim(), "%m/%d/%Y").map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "bad date {:?} for {symbol}: {e}",
                    row.date
                ))
            })?;
            if let Some(close) = Self::parse_price(&row.close) {
                points.push(PricePoint::new(date, close));
            }
        }

        Ok(points)
    }
}

impl DataProvider for NasdaqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Nasdaq
    }

    fn fetch_daily_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = Self::historical_url(symbol, start, end);
        tracing::debug!(provider = "nasdaq", %url, "requesting historical quotes");

        let body = http::get(&self.client, &url, symbol)?
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let points = Self::parse_response(symbol, &body)?;
        Ok(PriceSeries::from_unsorted(symbol, ProviderId::Nasdaq, points))
    }
}
