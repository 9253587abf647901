//! Domain types for Highwater

pub mod ids;
pub mod series;

pub use ids::{PriceBasis, ProviderId};
pub use series::{PricePoint, PriceSeries, SeriesError};

/// Symbol type alias
pub type Symbol = String;
