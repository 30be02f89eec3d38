pub mod cli;
pub mod core;
pub mod providers;

use crate::core::{Order, OrderType, Timeframe, TradeSide};
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Quote { symbol: String, json: bool },
    Fortune { symbol: String, json: bool },
    Dashboard,
    Chart { symbol: String, timeframe: Timeframe },
    Portfolio { json: bool },
    Trade {
        side: TradeSide,
        symbol: String,
        quantity: u32,
        limit: Option<f64>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Stock Fortune starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::market_data_from_config(&config)?;

    match command {
        AppCommand::Quote { symbol, json } => cli::quote::run(&provider, &symbol, json).await,
        AppCommand::Fortune { symbol, json } => cli::fortune::run(&provider, &symbol, json).await,
        AppCommand::Dashboard => cli::dashboard::run(&provider, &config.watchlist).await,
        AppCommand::Chart { symbol, timeframe } => {
            cli::chart::run(&provider, &symbol, timeframe).await
        }
        AppCommand::Portfolio { json } => {
            cli::portfolio::run(&provider, &config.portfolio, json).await
        }
        AppCommand::Trade {
            side,
            symbol,
            quantity,
            limit,
        } => {
            let order = Order::new(side, &symbol, quantity, OrderType::from_limit(limit));
            cli::trade::run(&provider, &config.portfolio, order).await
        }
    }
}
