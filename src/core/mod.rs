//! Core business logic: quotes, fortunes, price history and paper trading

pub mod config;
pub mod fortune;
pub mod history;
pub mod log;
pub mod market;
pub mod portfolio;
pub mod quote;

// Re-export main types for cleaner imports
pub use fortune::{Fortune, generate_fortune};
pub use history::{PricePoint, Timeframe};
pub use market::{FallbackMarketData, MarketDataProvider, QuoteSource};
pub use portfolio::{Order, OrderType, Portfolio, TradeSide};
pub use quote::{InflationSnapshot, Quote, Trend};
