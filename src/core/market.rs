//! Market data abstractions and the fallback quote pipeline

use crate::core::quote::{InflationSnapshot, Quote, Trend};
use crate::providers::mock::generate_mock_quote;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, instrument, warn};

/// Number of most recent intraday closes used for trend detection.
pub const TREND_WINDOW: usize = 10;

/// Current-quote snapshot as reported by a live source.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalQuote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
}

/// A fallible live data source.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Most recent intraday closes, oldest first, at most [`TREND_WINDOW`] entries.
    async fn fetch_intraday(&self, symbol: &str) -> Result<Vec<f64>>;
    async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote>;
    async fn fetch_inflation(&self) -> Result<InflationSnapshot>;
}

/// Produces a quote for any symbol. Never fails.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn get_quote(&self, symbol: &str) -> Quote;
}

/// Percent change between the oldest and newest close of a series.
pub fn series_percent_change(closes: &[f64]) -> Result<f64> {
    let (oldest, newest) = match (closes.first(), closes.last()) {
        (Some(oldest), Some(newest)) => (*oldest, *newest),
        _ => return Err(anyhow!("No intraday data available")),
    };
    if oldest <= 0.0 {
        return Err(anyhow!("Invalid reference price in intraday data: {}", oldest));
    }
    Ok((newest - oldest) / oldest * 100.0)
}

/// Wraps a live source and substitutes synthetic data on any failure.
pub struct FallbackMarketData<S: QuoteSource> {
    source: S,
}

impl<S: QuoteSource> FallbackMarketData<S> {
    pub fn new(source: S) -> Self {
        FallbackMarketData { source }
    }

    /// Fetches all three parts concurrently; any failure fails the whole quote.
    pub async fn fetch_live_quote(&self, symbol: &str) -> Result<Quote> {
        let (closes, global, inflation) = futures::try_join!(
            self.source.fetch_intraday(symbol),
            self.source.fetch_global_quote(symbol),
            self.source.fetch_inflation(),
        )?;

        let trend_percent = series_percent_change(&closes)?;
        debug!(symbol, trend_percent, "Computed intraday trend");

        Ok(Quote {
            symbol: symbol.to_string(),
            current_price: global.price,
            change: global.change,
            change_percent: global.change_percent,
            volume: global.volume,
            high: global.high,
            low: global.low,
            open: global.open,
            previous_close: global.previous_close,
            trend: Trend::classify(trend_percent),
            trend_percent,
            inflation,
            timestamp: Utc::now(),
            is_mock_data: false,
        })
    }
}

#[async_trait]
impl<S: QuoteSource> MarketDataProvider for FallbackMarketData<S> {
    #[instrument(name = "QuoteFetch", skip(self))]
    async fn get_quote(&self, symbol: &str) -> Quote {
        let symbol = symbol.trim().to_uppercase();
        match self.fetch_live_quote(&symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "API unavailable, using mock data");
                generate_mock_quote(&symbol)
            }
        }
    }
}

/// Fetches several symbols concurrently, preserving input order.
///
/// Each lookup falls back independently, so the result has one quote per symbol.
pub async fn get_quotes(
    provider: &(dyn MarketDataProvider + Send + Sync),
    symbols: &[String],
    on_complete: &(dyn Fn() + Sync),
) -> Vec<Quote> {
    let futures = symbols.iter().map(|symbol| async move {
        let quote = provider.get_quote(symbol).await;
        on_complete();
        quote
    });
    join_all(futures).await
}
