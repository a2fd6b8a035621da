//! Rate data access and the presenters built on it

pub mod calculator;
pub mod config;
pub mod currency_detail;
pub mod log;
pub mod metadata;
pub mod rate;
pub mod rate_list;
pub mod series;
pub mod state;

// Re-export main types for cleaner imports
pub use calculator::{CalculationOutcome, Calculator};
pub use currency_detail::CurrencyDetailPresenter;
pub use metadata::{CurrencyMetadata, MetadataTable};
pub use rate::{ExchangeRate, ExchangeRateClient};
pub use rate_list::{NavigationIntent, RateListPresenter};
pub use series::ChartSeries;
pub use state::QueryState;
