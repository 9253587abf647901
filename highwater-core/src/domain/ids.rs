//! Provider identifiers and the price basis each one reports on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The supported external market-data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Yahoo,
    Nasdaq,
    Stooq,
}

/// How historical closes are restated after corporate actions.
///
/// Closes on different bases drift apart before every ex-dividend date and
/// cannot be compared to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Printed closes, restated for splits only.
    SplitAdjusted,
    /// Closes back-adjusted for splits and cash dividends.
    DividendAdjusted,
}

impl ProviderId {
    pub const ALL: [ProviderId; 3] = [ProviderId::Yahoo, ProviderId::Nasdaq, ProviderId::Stooq];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Yahoo => "yahoo",
            ProviderId::Nasdaq => "nasdaq",
            ProviderId::Stooq => "stooq",
        }
    }

    /// Basis of the close column this source serves.
    ///
    /// Yahoo's chart `close` and Nasdaq's `Close/Last` are printed closes;
    /// Stooq's daily CSV restates history for dividends.
    pub fn basis(&self) -> PriceBasis {
        match self {
            ProviderId::Yahoo | ProviderId::Nasdaq => PriceBasis::SplitAdjusted,
            ProviderId::Stooq => PriceBasis::DividendAdjusted,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PriceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceBasis::SplitAdjusted => "split-adjusted",
            PriceBasis::DividendAdjusted => "dividend-adjusted",
        })
    }
}
