use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use stock_fortune::core::{Timeframe, TradeSide};
use stock_fortune::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the latest quote for a symbol
    Quote {
        symbol: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Tell the fortune of a symbol
    Fortune {
        symbol: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Display quotes for every symbol in the watchlist
    Dashboard,
    /// Display a simulated price chart for a symbol
    Chart {
        symbol: String,
        /// One of 1D, 1W, 1M, 3M, 1Y
        #[arg(short, long, default_value = "1D")]
        timeframe: Timeframe,
    },
    /// Display the paper-trading portfolio with unrealized P&L
    Portfolio {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Simulate a buy or sell order against the portfolio
    Trade {
        /// Either buy or sell
        side: TradeSide,
        symbol: String,
        quantity: u32,
        /// Fill at this price instead of the market price
        #[arg(long)]
        limit: Option<f64>,
    },
}

impl From<Commands> for stock_fortune::AppCommand {
    fn from(cmd: Commands) -> stock_fortune::AppCommand {
        match cmd {
            Commands::Quote { symbol, json } => stock_fortune::AppCommand::Quote { symbol, json },
            Commands::Fortune { symbol, json } => {
                stock_fortune::AppCommand::Fortune { symbol, json }
            }
            Commands::Dashboard => stock_fortune::AppCommand::Dashboard,
            Commands::Chart { symbol, timeframe } => {
                stock_fortune::AppCommand::Chart { symbol, timeframe }
            }
            Commands::Portfolio { json } => stock_fortune::AppCommand::Portfolio { json },
            Commands::Trade {
                side,
                symbol,
                quantity,
                limit,
            } => stock_fortune::AppCommand::Trade {
                side,
                symbol,
                quantity,
                limit,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => stock_fortune::cli::setup::setup_at_path(path),
            None => stock_fortune::cli::setup::setup(),
        },
        Some(cmd) => stock_fortune::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
