//! Data providers and the fetch step

pub mod fetch;
mod http;
pub mod memory;
pub mod nasdaq;
pub mod provider;
pub mod stooq;
pub mod yahoo;

pub use fetch::{fetch_close_series, FetchWindow, DEFAULT_CUTOFF_HOUR, DEFAULT_LOOKBACK_DAYS};
pub use memory::InMemoryProvider;
pub use nasdaq::NasdaqProvider;
pub use provider::{DataError, DataProvider};
pub use stooq::StooqProvider;
pub use yahoo::YahooProvider;

use crate::domain::ProviderId;

/// Build the live provider for `id`.
pub fn connect(id: ProviderId) -> Result<Box<dyn DataProvider>, DataError> {
    Ok(match id {
        ProviderId::Yahoo => Box::new(YahooProvider::new()?),
        ProviderId::Nasdaq => Box::new(NasdaqProvider::new()?),
        ProviderId::Stooq => Box::new(StooqProvider::new()?),
    })
}
