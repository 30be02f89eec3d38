pub mod alpha_vantage;
pub mod mock;

use crate::core::config::AppConfig;
use crate::core::market::FallbackMarketData;
use alpha_vantage::AlphaVantageSource;
use anyhow::Result;

/// Builds the live-with-fallback market data provider described by the config.
pub fn market_data_from_config(config: &AppConfig) -> Result<FallbackMarketData<AlphaVantageSource>> {
    let av = &config.providers.alpha_vantage;
    let source = AlphaVantageSource::new(&av.base_url, &av.resolve_api_key())?;
    Ok(FallbackMarketData::new(source))
}
