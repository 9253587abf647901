//! Run configuration.
//!
//! Every knob of a run lives here with its production value as the default.
//! The binary always runs with `SignalConfig::default()`; tests shrink the
//! windows to keep fixtures small.

use highwater_core::data::{FetchWindow, DEFAULT_CUTOFF_HOUR, DEFAULT_LOOKBACK_DAYS};
use highwater_core::gaps::DEFAULT_MAX_SKIPPED_PER_YEAR;
use highwater_core::indicators::DEFAULT_WINDOW;
use highwater_core::{Clock, GapValidator, ProviderId};

/// Closes closer than this are considered the same price.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Number of most recent joined dates that must all agree.
pub const DEFAULT_VALIDITY_WINDOW: usize = 100;

/// Number of recent non-zero signals listed in the report.
pub const DEFAULT_REPORT_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// Security to track.
    pub symbol: String,
    /// Provider whose closes and signal are reported.
    pub primary: ProviderId,
    /// Provider used only to cross-check the primary's closes.
    pub secondary: ProviderId,
    /// Calendar days between window start and end.
    pub lookback_days: i64,
    /// Local hour from which today's close is treated as final.
    pub cutoff_hour: u32,
    /// Rolling maximum window, in trading days.
    pub window: usize,
    /// Gap validator ceiling per calendar year.
    pub max_skipped_per_year: u32,
    /// Agreement tolerance between the two providers' closes.
    pub tolerance: f64,
    /// Trailing joined dates that decide the validity verdict.
    pub validity_window: usize,
    /// Rows in the recent-signals table.
    pub report_rows: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            primary: ProviderId::Yahoo,
            secondary: ProviderId::Nasdaq,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            cutoff_hour: DEFAULT_CUTOFF_HOUR,
            window: DEFAULT_WINDOW,
            max_skipped_per_year: DEFAULT_MAX_SKIPPED_PER_YEAR,
            tolerance: DEFAULT_TOLERANCE,
            validity_window: DEFAULT_VALIDITY_WINDOW,
            report_rows: DEFAULT_REPORT_ROWS,
        }
    }
}

impl SignalConfig {
    pub fn fetch_window(&self, clock: &dyn Clock) -> FetchWindow {
        FetchWindow::ending_at(clock.now(), self.cutoff_hour, self.lookback_days)
    }

    pub fn gap_validator(&self) -> GapValidator {
        GapValidator::new(self.max_skipped_per_year)
    }
}
