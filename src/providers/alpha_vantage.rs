use crate::core::market::{GlobalQuote, QuoteSource, TREND_WINDOW};
use crate::core::quote::InflationSnapshot;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

const INTRADAY_INTERVAL: &str = "5min";

/// Alpha Vantage REST client serving intraday series and global quotes.
///
/// Transport errors are stripped of the request URL, which carries `apikey`.
pub struct AlphaVantageSource {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AlphaVantageSource {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("stock-fortune/1.0")
            .build()?;
        Ok(AlphaVantageSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Issues a query and rejects responses carrying an error or rate-limit marker.
    async fn query<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let endpoint = format!("{}/query", self.base_url);
        let url = reqwest::Url::parse_with_params(
            &endpoint,
            params
                .iter()
                .copied()
                .chain([("apikey", self.api_key.as_str())]),
        )
        .with_context(|| format!("Invalid base URL: {}", self.base_url))?;
        debug!(?params, "Requesting data from {}", endpoint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e.without_url(), endpoint))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for URL: {}",
                response.status(),
                endpoint
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to read response body: {} URL: {}",
                    e.without_url(),
                    endpoint
                )
            })?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {endpoint}"))?;

        if let Some(message) = value.get("Error Message").and_then(|m| m.as_str()) {
            return Err(anyhow!("API error: {}", message));
        }
        if value.get("Note").is_some() || value.get("Information").is_some() {
            return Err(anyhow!(
                "API call frequency limit reached. Please try again later."
            ));
        }

        serde_json::from_value(value)
            .with_context(|| format!("Unexpected response shape from {endpoint}"))
    }
}

#[derive(Deserialize, Debug)]
struct IntradayResponse {
    #[serde(rename = "Time Series (5min)")]
    time_series: Option<BTreeMap<String, IntradayBar>>,
}

#[derive(Deserialize, Debug)]
struct IntradayBar {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Deserialize, Debug)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    quote: Option<GlobalQuoteFields>,
}

#[derive(Deserialize, Debug)]
struct GlobalQuoteFields {
    #[serde(rename = "02. open")]
    open: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "08. previous close")]
    previous_close: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .with_context(|| format!("Invalid number for {field}: '{raw}'"))
}

impl TryFrom<GlobalQuoteFields> for GlobalQuote {
    type Error = anyhow::Error;

    fn try_from(fields: GlobalQuoteFields) -> Result<Self> {
        Ok(GlobalQuote {
            price: parse_number("price", &fields.price)?,
            change: parse_number("change", &fields.change)?,
            change_percent: parse_number("change percent", &fields.change_percent)?,
            volume: fields
                .volume
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid number for volume: '{}'", fields.volume))?,
            high: parse_number("high", &fields.high)?,
            low: parse_number("low", &fields.low)?,
            open: parse_number("open", &fields.open)?,
            previous_close: parse_number("previous close", &fields.previous_close)?,
        })
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageSource {
    #[instrument(name = "AlphaVantageIntraday", skip(self), fields(symbol = %symbol))]
    async fn fetch_intraday(&self, symbol: &str) -> Result<Vec<f64>> {
        let data: IntradayResponse = self
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", INTRADAY_INTERVAL),
            ])
            .await?;

        let series = data
            .time_series
            .ok_or_else(|| anyhow!("No intraday data available for symbol: {}", symbol))?;

        // Timestamps sort chronologically, so the tail holds the newest bars.
        let skip = series.len().saturating_sub(TREND_WINDOW);
        series
            .iter()
            .skip(skip)
            .map(|(ts, bar)| parse_number(&format!("close at {ts}"), &bar.close))
            .collect()
    }

    #[instrument(name = "AlphaVantageGlobalQuote", skip(self), fields(symbol = %symbol))]
    async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote> {
        let data: GlobalQuoteResponse = self
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;

        let fields = data
            .quote
            .ok_or_else(|| anyhow!("No quote data available for symbol: {}", symbol))?;
        fields.try_into()
    }

    async fn fetch_inflation(&self) -> Result<InflationSnapshot> {
        Ok(InflationSnapshot::constant())
    }
}
