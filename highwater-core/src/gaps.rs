//! Per-year gap validator.
//!
//! Walks a series in date order while tracking the weekday it expects next.
//! Every mismatch counts as one skipped trading day for the calendar year
//! being tracked; crossing into a new year checks the count against a ceiling
//! and resets it. Exchange holidays alone account for about ten skips a year.
//!
//! A mismatch advances `expected` by a single extra weekday no matter how
//! wide the real gap is, so one multi-day hole keeps registering mismatches
//! until `expected` catches up. The default ceiling of 13 assumes exactly
//! this stepping.
//!
//! Also by construction: a mismatch on the first date of a new year is
//! charged to the year being closed, and the final (still open) year is
//! never checked.

use crate::domain::PriceSeries;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use thiserror::Error;

pub const DEFAULT_MAX_SKIPPED_PER_YEAR: u32 = 13;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GapError {
    #[error("{year} skipped {skipped} days (limit {limit})")]
    TooManySkippedDays { year: i32, skipped: u32, limit: u32 },
}

/// Next Monday-to-Friday date strictly after `date`.
pub fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next += Duration::days(1);
    }
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapValidator {
    max_skipped_per_year: u32,
}

impl Default for GapValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SKIPPED_PER_YEAR)
    }
}

impl GapValidator {
    pub fn new(max_skipped_per_year: u32) -> Self {
        Self {
            max_skipped_per_year,
        }
    }

    pub fn max_skipped_per_year(&self) -> u32 {
        self.max_skipped_per_year
    }

    /// Inspect `series`; fails on the first closed year whose skip count
    /// exceeds the ceiling. An empty series passes.
    pub fn validate(&self, series: &PriceSeries) -> Result<(), GapError> {
        let Some(first) = series.first_date() else {
            return Ok(());
        };

        let mut expected = first;
        let mut current_year = first.year();
        let mut skipped: u32 = 0;

        for date in series.dates() {
            if date != expected {
                skipped += 1;
                expected = next_weekday(expected);
            }
            expected = next_weekday(expected);

            if date.year() != current_year {
                if skipped > self.max_skipped_per_year {
                    return Err(GapError::TooManySkippedDays {
                        year: current_year,
                        skipped,
                        limit: self.max_skipped_per_year,
                    });
                }
                tracing::debug!(
                    provider = %series.source(),
                    year = current_year,
                    skipped,
                    "year passed gap check"
                );
                current_year = date.year();
                skipped = 0;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, ProviderId};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series_of(dates: &[NaiveDate]) -> PriceSeries {
        let points = dates.iter().map(|&date| PricePoint::new(date, 100.0)).collect();
        PriceSeries::new("SPY", ProviderId::Yahoo, points).unwrap()
    }

    fn weekdays(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        from.iter_days()
            .take_while(|&date| date <= to)
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .collect()
    }

    #[test]
    fn next_weekday_skips_weekend() {
        // 2024-01-05 is a Friday
        assert_eq!(next_weekday(d(2024, 1, 5)), d(2024, 1, 8));
        assert_eq!(next_weekday(d(2024, 1, 6)), d(2024, 1, 8));
        assert_eq!(next_weekday(d(2024, 1, 8)), d(2024, 1, 9));
    }

    #[test]
    fn empty_series_passes() {
        assert_eq!(GapValidator::default().validate(&series_of(&[])), Ok(()));
    }

    #[test]
    fn full_weekday_calendar_passes() {
        let dates = weekdays(d(2018, 1, 1), d(2021, 12, 31));
        assert_eq!(GapValidator::default().validate(&series_of(&dates)), Ok(()));
    }

    #[test]
    fn multi_day_gap_keeps_counting_until_caught_up() {
        // Tue-Thu of the week of 2024-01-08 are missing. The single hole
        // registers on Fri 12, Mon 15 and Tue 16, and the jump to 2025
        // registers once more.
        let dates = [
            d(2024, 1, 8),
            d(2024, 1, 12),
            d(2024, 1, 15),
            d(2024, 1, 16),
            d(2025, 1, 2),
        ];
        let err = GapValidator::new(2).validate(&series_of(&dates)).unwrap_err();
        assert_eq!(
            err,
            GapError::TooManySkippedDays {
                year: 2024,
                skipped: 4,
                limit: 2
            }
        );
    }

    #[test]
    fn final_year_is_never_checked() {
        // Every other weekday of 2024: dozens of mismatches, no year boundary.
        let dates: Vec<_> = weekdays(d(2024, 1, 1), d(2024, 12, 31))
            .into_iter()
            .step_by(2)
            .collect();
        assert_eq!(GapValidator::default().validate(&series_of(&dates)), Ok(()));
    }

    #[test]
    fn error_message_names_year_and_count() {
        let err = GapError::TooManySkippedDays {
            year: 2019,
            skipped: 20,
            limit: 13,
        };
        assert_eq!(err.to_string(), "2019 skipped 20 days (limit 13)");
    }
}
