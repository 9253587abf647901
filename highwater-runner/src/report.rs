//! Plain-text signal report.

use crate::config::SignalConfig;
use crate::reconcile::{ComparisonReport, Validity};
use chrono::NaiveDate;
use highwater_core::Signal;

/// One line of the recent-signals table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLine {
    pub date: NaiveDate,
    pub close: f64,
    pub rolling_max: f64,
    pub signal: Signal,
}

/// Everything printed for a run, taken from the primary provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalReport {
    pub date: NaiveDate,
    pub close: f64,
    pub validity: Validity,
    pub signal: Signal,
    pub window: usize,
    pub recent: Vec<ReportLine>,
}

impl SignalReport {
    /// Summarize the latest joined date. `None` for an empty comparison.
    pub fn from_comparison(report: &ComparisonReport, config: &SignalConfig) -> Option<Self> {
        let latest = report.latest()?;

        let recent = report
            .recent_actions(config.report_rows)
            .into_iter()
            .filter_map(|row| {
                // recent_actions only yields rows with a defined signal, and a
                // defined signal implies a defined rolling max
                let (Some(rolling_max), Some(signal)) =
                    (row.primary.rolling_max, row.primary.signal)
                else {
                    return None;
                };
                Some(ReportLine {
                    date: row.date,
                    close: row.primary.close,
                    rolling_max,
                    signal,
                })
            })
            .collect();

        Some(Self {
            date: latest.date,
            close: latest.primary.close,
            validity: report.validity(config.validity_window),
            // not enough history yet for a signal on the latest date
            signal: latest.primary.signal.unwrap_or(Signal::DoNothing),
            window: config.window,
            recent,
        })
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Date: {}\nClose: {:.2}\nValid: {}\nSignal: {}\n\n",
            self.date, self.close, self.validity, self.signal
        );

        out.push_str(&format!(
            "{:<10}  {:>10}  {:>10}  {:>6}\n",
            "Date",
            "Close",
            format!("Max {}", self.window),
            "Signal"
        ));
        for line in &self.recent {
            out.push_str(&format!(
                "{:<10}  {:>10.2}  {:>10.2}  {:>6}\n",
                line.date.to_string(),
                line.close,
                line.rolling_max,
                line.signal.value()
            ));
        }

        out
    }
}
