//! In-memory provider serving a fixed series.
//!
//! Stands in for a live source in pipeline tests and offline runs. Requests
//! are answered by clipping the stored series to the requested range.

use super::provider::{DataError, DataProvider};
use crate::domain::{PriceSeries, ProviderId};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    id: ProviderId,
    series: PriceSeries,
}

impl InMemoryProvider {
    /// Serve `series` under the given provider identity.
    pub fn new(id: ProviderId, series: PriceSeries) -> Self {
        Self { id, series }
    }
}

impl DataProvider for InMemoryProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn fetch_daily_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        if !self.series.symbol().eq_ignore_ascii_case(symbol) {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let clipped = self.series.clip(start, end);
        Ok(PriceSeries::from_unsorted(
            symbol,
            self.id,
            clipped.points().to_vec(),
        ))
    }
}
