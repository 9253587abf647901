//! PriceSeries: daily closing prices for one symbol from one provider.

use super::{ProviderId, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closing price for a single trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("dates not strictly ascending at index {index}: {date} follows {previous}")]
    NotAscending {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },
}

/// Ordered closing prices for a single symbol.
///
/// Dates are strictly ascending: no duplicates, no reordering. Both
/// constructors uphold this, so downstream code can rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    source: ProviderId,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points that are already in ascending date order.
    pub fn new(
        symbol: impl Into<Symbol>,
        source: ProviderId,
        points: Vec<PricePoint>,
    ) -> Result<Self, SeriesError> {
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NotAscending {
                    index: index + 1,
                    previous: pair[0].date,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            source,
            points,
        })
    }

    /// Build a series from provider rows in any order.
    ///
    /// Rows are sorted by date; when a date repeats, the row that came later
    /// in the provider's output wins.
    pub fn from_unsorted(
        symbol: impl Into<Symbol>,
        source: ProviderId,
        mut points: Vec<PricePoint>,
    ) -> Self {
        // stable sort keeps provider order among equal dates
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self {
            symbol: symbol.into(),
            source,
            points: deduped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn source(&self) -> ProviderId {
        self.source
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Keep only the points whose date falls in `[start, end]`.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: self.symbol.clone(),
            source: self.source,
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect(),
        }
    }
}
