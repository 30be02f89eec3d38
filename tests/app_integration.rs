use std::fs;
use stock_fortune::core::MarketDataProvider;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const INTRADAY_RESPONSE: &str = r#"{
        "Meta Data": {"2. Symbol": "IBM"},
        "Time Series (5min)": {
            "2024-08-30 15:15:00": {"4. close": "100.0000"},
            "2024-08-30 15:20:00": {"4. close": "100.5000"},
            "2024-08-30 15:25:00": {"4. close": "101.2000"},
            "2024-08-30 15:30:00": {"4. close": "102.0000"},
            "2024-08-30 15:35:00": {"4. close": "102.4000"},
            "2024-08-30 15:40:00": {"4. close": "102.8000"},
            "2024-08-30 15:45:00": {"4. close": "103.0000"},
            "2024-08-30 15:50:00": {"4. close": "103.1000"},
            "2024-08-30 15:55:00": {"4. close": "103.3000"},
            "2024-08-30 16:00:00": {"4. close": "103.5000"}
        }
    }"#;

    pub const GLOBAL_QUOTE_RESPONSE: &str = r#"{
        "Global Quote": {
            "01. symbol": "IBM",
            "02. open": "101.0000",
            "03. high": "104.0000",
            "04. low": "99.5000",
            "05. price": "103.5000",
            "06. volume": "4200000",
            "07. latest trading day": "2024-08-30",
            "08. previous close": "97.0000",
            "09. change": "6.5000",
            "10. change percent": "6.7010%"
        }
    }"#;

    pub async fn create_mock_server(intraday: &str, global_quote: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "TIME_SERIES_INTRADAY"))
            .respond_with(ResponseTemplate::new(200).set_body_string(intraday))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "GLOBAL_QUOTE"))
            .respond_with(ResponseTemplate::new(200).set_body_string(global_quote))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        write_config_file(base_url, "")
    }

    pub fn write_config_with_portfolio(base_url: &str) -> tempfile::NamedTempFile {
        let portfolio = r#"
portfolio:
  cash: 500.0
  holdings:
    - symbol: "IBM"
      quantity: 10
      avg_price: 100.0
"#;
        write_config_file(base_url, portfolio)
    }

    fn write_config_file(base_url: &str, extra: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
watchlist:
  - "IBM"
  - "AAPL"
providers:
  alpha_vantage:
    base_url: {base_url}
    api_key: "test-key"
{extra}"#
        );
        std::fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_live_quote_through_mock_api() {
    let mock_server = test_utils::create_mock_server(
        test_utils::INTRADAY_RESPONSE,
        test_utils::GLOBAL_QUOTE_RESPONSE,
    )
    .await;
    let config_file = test_utils::write_config(&mock_server.uri());
    let config = stock_fortune::core::config::AppConfig::load_from_path(config_file.path())
        .expect("Failed to load config");

    let provider = stock_fortune::providers::market_data_from_config(&config).unwrap();
    let quote = provider.get_quote("ibm").await;
    info!(?quote, "Received quote");

    assert!(!quote.is_mock_data);
    assert_eq!(quote.symbol, "IBM");
    assert_eq!(quote.current_price, 103.5);
    assert_eq!(quote.volume, 4_200_000);
    assert_eq!(quote.trend, stock_fortune::core::Trend::Rising);
    assert!((quote.trend_percent - 3.5).abs() < 1e-9);

    let fortune = stock_fortune::core::generate_fortune(&quote);
    // 70 + 15 (change > 5%) + 10 (volume) + 5 (stable inflation)
    assert_eq!(fortune.confidence, 95);
    assert_eq!(fortune.category, "Rising Fortune");
    assert_eq!(fortune.advice.len(), 3);
    assert_eq!(
        fortune.advice[2],
        "High volume suggests strong conviction in the move"
    );
}

#[test_log::test(tokio::test)]
async fn test_rate_limited_api_falls_back_to_mock_data() {
    let rate_limited = r#"{"Note": "Thank you for using Alpha Vantage! Please try again later."}"#;
    let mock_server =
        test_utils::create_mock_server(rate_limited, test_utils::GLOBAL_QUOTE_RESPONSE).await;
    let config_file = test_utils::write_config(&mock_server.uri());
    let config = stock_fortune::core::config::AppConfig::load_from_path(config_file.path())
        .expect("Failed to load config");

    let provider = stock_fortune::providers::market_data_from_config(&config).unwrap();
    let quote = provider.get_quote("AAPL").await;

    assert!(quote.is_mock_data);
    assert_eq!(quote.symbol, "AAPL");
    assert!((175.74..=184.76).contains(&quote.current_price));
    assert!((10_000_000..60_000_000).contains(&quote.volume));
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(
        test_utils::INTRADAY_RESPONSE,
        test_utils::GLOBAL_QUOTE_RESPONSE,
    )
    .await;
    let config_file = test_utils::write_config(&mock_server.uri());
    let config_path = config_file.path().to_str().unwrap();

    let commands = vec![
        stock_fortune::AppCommand::Quote {
            symbol: "IBM".to_string(),
            json: false,
        },
        stock_fortune::AppCommand::Quote {
            symbol: "IBM".to_string(),
            json: true,
        },
        stock_fortune::AppCommand::Fortune {
            symbol: "IBM".to_string(),
            json: false,
        },
        stock_fortune::AppCommand::Fortune {
            symbol: "IBM".to_string(),
            json: true,
        },
        stock_fortune::AppCommand::Dashboard,
        stock_fortune::AppCommand::Chart {
            symbol: "IBM".to_string(),
            timeframe: stock_fortune::core::Timeframe::OneWeek,
        },
        stock_fortune::AppCommand::Portfolio { json: false },
        stock_fortune::AppCommand::Portfolio { json: true },
        stock_fortune::AppCommand::Trade {
            side: stock_fortune::core::TradeSide::Buy,
            symbol: "IBM".to_string(),
            quantity: 2,
            limit: None,
        },
        stock_fortune::AppCommand::Trade {
            side: stock_fortune::core::TradeSide::Sell,
            symbol: "AAPL".to_string(),
            quantity: 10,
            limit: Some(190.0),
        },
    ];

    for command in commands {
        let result = stock_fortune::run_command(command.clone(), Some(config_path)).await;
        assert!(
            result.is_ok(),
            "{command:?} failed with: {:?}",
            result.err()
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_portfolio_valued_with_live_quotes() {
    let mock_server = test_utils::create_mock_server(
        test_utils::INTRADAY_RESPONSE,
        test_utils::GLOBAL_QUOTE_RESPONSE,
    )
    .await;
    let config_file = test_utils::write_config_with_portfolio(&mock_server.uri());
    let config = stock_fortune::core::config::AppConfig::load_from_path(config_file.path())
        .expect("Failed to load config");
    let provider = stock_fortune::providers::market_data_from_config(&config).unwrap();

    let quotes = stock_fortune::core::market::get_quotes(
        &provider,
        &config.portfolio.symbols(),
        &|| {},
    )
    .await;
    let value = stock_fortune::core::portfolio::calculate_portfolio_value(&config.portfolio, &quotes);
    info!(?value, "Valued portfolio");

    assert!(!value.holdings[0].is_mock_data);
    assert!((value.market_value - 1035.0).abs() < 1e-9);
    assert!((value.unrealized_pnl - 35.0).abs() < 1e-9);
    assert!((value.total_value - 1535.0).abs() < 1e-9);
}

#[test_log::test(tokio::test)]
async fn test_trade_rejections_surface_as_errors() {
    let mock_server = test_utils::create_mock_server(
        test_utils::INTRADAY_RESPONSE,
        test_utils::GLOBAL_QUOTE_RESPONSE,
    )
    .await;
    let config_file = test_utils::write_config_with_portfolio(&mock_server.uri());
    let config_path = config_file.path().to_str().unwrap();

    // 10 * 103.50 exceeds the 500.00 cash balance.
    let buy = stock_fortune::run_command(
        stock_fortune::AppCommand::Trade {
            side: stock_fortune::core::TradeSide::Buy,
            symbol: "IBM".to_string(),
            quantity: 10,
            limit: None,
        },
        Some(config_path),
    )
    .await;
    let message = format!("{:#}", buy.unwrap_err());
    assert!(message.contains("Insufficient funds"), "{message}");

    let sell = stock_fortune::run_command(
        stock_fortune::AppCommand::Trade {
            side: stock_fortune::core::TradeSide::Sell,
            symbol: "IBM".to_string(),
            quantity: 11,
            limit: None,
        },
        Some(config_path),
    )
    .await;
    let message = format!("{:#}", sell.unwrap_err());
    assert!(message.contains("Insufficient shares to sell"), "{message}");

    // A preview never rewrites the config.
    let config = stock_fortune::core::config::AppConfig::load_from_path(config_path).unwrap();
    assert_eq!(config.portfolio.holding("IBM").unwrap().quantity, 10);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_api_still_runs_commands() {
    // Nothing listens on port 9, so every request fails and falls back.
    let config_file = test_utils::write_config("http://127.0.0.1:9");
    let config_path = config_file.path().to_str().unwrap();

    let result = stock_fortune::run_command(
        stock_fortune::AppCommand::Fortune {
            symbol: "NFLX".to_string(),
            json: true,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Fortune failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.yaml");

    let result =
        stock_fortune::run_command(stock_fortune::AppCommand::Dashboard, missing.to_str()).await;
    assert!(result.is_err());
}

#[test_log::test]
fn test_setup_writes_loadable_config() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");

    stock_fortune::cli::setup::setup_at_path(&path).expect("Setup failed");
    let content = fs::read_to_string(&path).expect("Config not written");
    info!(%content, "Wrote config");

    let config = stock_fortune::core::config::AppConfig::load_from_path(&path)
        .expect("Generated config should load");
    assert_eq!(config.watchlist.len(), 6);
}
