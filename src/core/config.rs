use crate::core::portfolio::Portfolio;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
const DEFAULT_API_KEY: &str = "demo";

/// Well-known symbols; the first six form the default watchlist.
pub const POPULAR_SYMBOLS: [&str; 8] = [
    "AAPL", "TSLA", "GOOGL", "MSFT", "AMZN", "NVDA", "META", "NFLX",
];

const DEFAULT_WATCHLIST_LEN: usize = 6;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlphaVantageConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        AlphaVantageConfig {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

impl AlphaVantageConfig {
    /// Config value first, then the environment, then the public demo key.
    pub fn resolve_api_key(&self) -> String {
        let non_blank = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(non_blank))
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub alpha_vantage: AlphaVantageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Paper-trading account used by `portfolio` and `trade`.
    #[serde(default)]
    pub portfolio: Portfolio,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            watchlist: default_watchlist(),
            providers: ProvidersConfig::default(),
            portfolio: Portfolio::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_watchlist() -> Vec<String> {
    POPULAR_SYMBOLS
        .iter()
        .take(DEFAULT_WATCHLIST_LEN)
        .map(|s| s.to_string())
        .collect()
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults if none exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "stock-fortune", "stock-fortune")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
watchlist:
  - "AAPL"
  - "IBM"
providers:
  alpha_vantage:
    base_url: "http://example.com/av"
    api_key: "secret"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.watchlist, vec!["AAPL", "IBM"]);
        assert_eq!(
            config.providers.alpha_vantage.base_url,
            "http://example.com/av"
        );
        assert_eq!(config.providers.alpha_vantage.resolve_api_key(), "secret");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(
            config.watchlist,
            vec!["AAPL", "TSLA", "GOOGL", "MSFT", "AMZN", "NVDA"]
        );
        assert_eq!(config.providers.alpha_vantage.base_url, DEFAULT_BASE_URL);
        assert!(config.providers.alpha_vantage.api_key.is_none());
        assert_eq!(config.portfolio.cash, 25_000.0);
        assert_eq!(config.portfolio.symbols(), vec!["AAPL", "TSLA", "GOOGL"]);
    }

    #[test]
    fn test_portfolio_section_deserialization() {
        let yaml_str = r#"
portfolio:
  cash: 1500.0
  holdings:
    - symbol: "IBM"
      quantity: 2
      avg_price: 190.0
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.portfolio.cash, 1500.0);
        assert_eq!(config.portfolio.holdings.len(), 1);
        assert_eq!(config.portfolio.holding("IBM").unwrap().quantity, 2);
        assert!(config.portfolio.trades.is_empty());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = AlphaVantageConfig {
            base_url: default_base_url(),
            api_key: Some("  ".to_string()),
        };
        // Either the environment or the demo key, never the blank value.
        assert!(!config.resolve_api_key().trim().is_empty());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/definitely/not/here/config.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
