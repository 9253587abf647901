//! Rolling-max trend signal.
//!
//! The signal on a day is the direction the rolling maximum moved since the
//! previous day: a new high inside the window is a buy, the old high leaving
//! the window with nothing as high to replace it is a sell, and an unchanged
//! maximum means do nothing.

use crate::domain::{PriceSeries, ProviderId};
use crate::indicators::rolling_max;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    DoNothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid signal value {0} (expected -1, 0 or 1)")]
pub struct InvalidSignal(pub i8);

impl Signal {
    /// Sign of `current - previous`.
    pub fn from_change(previous: f64, current: f64) -> Self {
        if current > previous {
            Signal::Buy
        } else if current < previous {
            Signal::Sell
        } else {
            Signal::DoNothing
        }
    }

    pub fn value(&self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::DoNothing => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::DoNothing => "DO NOTHING",
        }
    }

    pub fn is_action(&self) -> bool {
        *self != Signal::DoNothing
    }
}

impl TryFrom<i8> for Signal {
    type Error = InvalidSignal;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Signal::Buy),
            -1 => Ok(Signal::Sell),
            0 => Ok(Signal::DoNothing),
            other => Err(InvalidSignal(other)),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of a signal series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub close: f64,
    pub rolling_max: Option<f64>,
    pub signal: Option<Signal>,
}

/// A price series annotated with its rolling maximum and signal, tagged with
/// the provider it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSeries {
    pub symbol: String,
    pub source: ProviderId,
    pub window: usize,
    pub rows: Vec<SignalRow>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&SignalRow> {
        self.rows.last()
    }
}

/// Compute the rolling maximum over `window` closes and its day-over-day
/// direction.
pub fn compute_signal(series: &PriceSeries, window: usize) -> SignalSeries {
    let closes = series.closes();
    let maxima = rolling_max(&closes, window);

    let rows = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let signal = match (i.checked_sub(1).and_then(|p| maxima[p]), maxima[i]) {
                (Some(previous), Some(current)) => Some(Signal::from_change(previous, current)),
                _ => None,
            };
            SignalRow {
                date: point.date,
                close: point.close,
                rolling_max: maxima[i],
                signal,
            }
        })
        .collect();

    SignalSeries {
        symbol: series.symbol().to_string(),
        source: series.source(),
        window,
        rows,
    }
}
