//! Synthetic quotes used when the live source is unavailable.
use crate::core::quote::{InflationSnapshot, Quote, Trend, round2};
use chrono::Utc;
use rand::Rng;

const DEFAULT_BASE_PRICE: f64 = 100.0;
const VOLATILITY: f64 = 0.05;

/// Reference prices for the popular symbols; anything else starts at 100.
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "AAPL" => 180.25,
        "TSLA" => 215.80,
        "GOOGL" => 2850.75,
        "MSFT" => 420.50,
        "AMZN" => 145.30,
        "NVDA" => 875.20,
        "META" => 485.60,
        "NFLX" => 625.40,
        _ => DEFAULT_BASE_PRICE,
    }
}

pub fn generate_mock_quote(symbol: &str) -> Quote {
    generate_mock_quote_with(symbol, &mut rand::rng())
}

/// Builds a synthetic quote around the symbol's base price.
///
/// High and low are drawn above and below the current price, so
/// `low <= current_price <= high` holds for every synthetic quote.
pub fn generate_mock_quote_with<R: Rng>(symbol: &str, rng: &mut R) -> Quote {
    let base = base_price(symbol);
    let change = (rng.random::<f64>() - 0.5) * base * VOLATILITY;
    let current_price = base + change;
    let change_percent = change / base * 100.0;

    let volume = rng.random_range(10_000_000..60_000_000);
    let high = current_price + rng.random::<f64>() * 5.0;
    let low = current_price - rng.random::<f64>() * 5.0;
    let open = current_price + (rng.random::<f64>() - 0.5) * 2.0;

    Quote {
        symbol: symbol.to_string(),
        current_price: round2(current_price),
        change: round2(change),
        change_percent: round2(change_percent),
        volume,
        high: round2(high),
        low: round2(low),
        open: round2(open),
        previous_close: round2(current_price - change),
        trend: Trend::classify(change_percent),
        trend_percent: change_percent,
        inflation: InflationSnapshot::constant(),
        timestamp: Utc::now(),
        is_mock_data: true,
    }
}
