//! Cross-provider reconciliation.
//!
//! Joins two signal series on date (inner join) and flags, per date, whether
//! both providers report the same close within a tolerance. The verdict on
//! the whole run looks only at the most recent dates.

use chrono::NaiveDate;
use highwater_core::{ProviderId, SignalRow, SignalSeries};
use std::cmp::Ordering;
use std::fmt;

/// Whether the two providers agreed over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Yes,
    No,
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Validity::Yes => "YES",
            Validity::No => "NO",
        })
    }
}

/// Both providers' view of a single date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub primary: SignalRow,
    pub secondary: SignalRow,
    pub agrees: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub symbol: String,
    pub primary: ProviderId,
    pub secondary: ProviderId,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// Inner-join two date-ascending series and flag close agreement.
    pub fn join(primary: &SignalSeries, secondary: &SignalSeries, tolerance: f64) -> Self {
        let (a, b) = (&primary.rows, &secondary.rows);
        let mut rows = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].date.cmp(&b[j].date) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    rows.push(ComparisonRow {
                        date: a[i].date,
                        primary: a[i],
                        secondary: b[j],
                        agrees: (a[i].close - b[j].close).abs() < tolerance,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }

        Self {
            symbol: primary.symbol.clone(),
            primary: primary.source,
            secondary: secondary.source,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&ComparisonRow> {
        self.rows.last()
    }

    /// The most recent `window` rows (fewer if the report is shorter).
    pub fn tail(&self, window: usize) -> &[ComparisonRow] {
        &self.rows[self.rows.len().saturating_sub(window)..]
    }

    /// Number of disagreeing dates among the most recent `window` rows.
    pub fn disagreements(&self, window: usize) -> usize {
        self.tail(window).iter().filter(|row| !row.agrees).count()
    }

    /// `Yes` when every one of the most recent `window` rows agrees.
    /// An empty tail is `No`.
    pub fn validity(&self, window: usize) -> Validity {
        let tail = self.tail(window);
        if !tail.is_empty() && tail.iter().all(|row| row.agrees) {
            Validity::Yes
        } else {
            Validity::No
        }
    }

    /// The last `n` rows on which the primary provider's signal called for
    /// action, oldest first.
    pub fn recent_actions(&self, n: usize) -> Vec<&ComparisonRow> {
        let mut picked: Vec<&ComparisonRow> = self
            .rows
            .iter()
            .rev()
            .filter(|row| row.primary.signal.is_some_and(|s| s.is_action()))
            .take(n)
            .collect();
        picked.reverse();
        picked
    }
}
