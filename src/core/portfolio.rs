//! Paper-trading portfolio: holdings, cash, order execution and valuation.
//!
//! Everything here is a pure calculation over the portfolio held in the
//! config file. Executed trades update an in-memory copy only.
use crate::core::quote::Quote;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

const DEFAULT_CASH: f64 = 25_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TradeSide::Buy => "buy",
                TradeSide::Sell => "sell",
            }
        )
    }
}

impl FromStr for TradeSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            _ => Err(anyhow::anyhow!("Invalid trade side: {}", s)),
        }
    }
}

/// How the execution price of an order is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderType {
    /// Fills at the current quote.
    Market,
    /// Fills at the given price.
    Limit(f64),
}

impl OrderType {
    pub fn from_limit(limit: Option<f64>) -> Self {
        limit.map_or(OrderType::Market, OrderType::Limit)
    }

    pub fn execution_price(&self, market_price: f64) -> f64 {
        match self {
            OrderType::Market => market_price,
            OrderType::Limit(price) => *price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: u32,
    pub order_type: OrderType,
}

impl Order {
    pub fn new(side: TradeSide, symbol: &str, quantity: u32, order_type: OrderType) -> Self {
        Order {
            symbol: symbol.trim().to_uppercase(),
            side,
            quantity,
            order_type,
        }
    }

    /// Cash moved by the order when filled against `market_price`.
    pub fn total(&self, market_price: f64) -> f64 {
        calculate_total(self.order_type, market_price, self.quantity)
    }
}

pub fn calculate_total(order_type: OrderType, market_price: f64, quantity: u32) -> f64 {
    order_type.execution_price(market_price) * quantity as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: u32,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Filled,
}

impl Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeStatus::Filled => write!(f, "filled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: usize,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: u32,
    pub price: f64,
    pub date: NaiveDate,
    pub status: TradeStatus,
}

/// Cash balance, open positions and trade history, newest trade first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default = "default_cash")]
    pub cash: f64,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

impl Default for Portfolio {
    fn default() -> Self {
        let holding = |symbol: &str, quantity, avg_price| Holding {
            symbol: symbol.to_string(),
            quantity,
            avg_price,
        };
        Portfolio {
            cash: DEFAULT_CASH,
            holdings: vec![
                holding("AAPL", 10, 175.50),
                holding("TSLA", 5, 220.00),
                holding("GOOGL", 3, 2800.00),
            ],
            trades: Vec::new(),
        }
    }
}

fn default_cash() -> f64 {
    DEFAULT_CASH
}

impl Portfolio {
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.symbol.eq_ignore_ascii_case(symbol))
    }

    fn holding_mut(&mut self, symbol: &str) -> Option<&mut Holding> {
        self.holdings
            .iter_mut()
            .find(|h| h.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn symbols(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.symbol.clone()).collect()
    }

    /// Fills `order` against `market_price` and records it.
    ///
    /// A rejected order leaves the portfolio unchanged.
    pub fn execute(
        &mut self,
        order: &Order,
        market_price: f64,
        date: NaiveDate,
    ) -> Result<&TradeRecord> {
        if order.quantity == 0 {
            bail!("Quantity must be at least 1");
        }
        let price = order.order_type.execution_price(market_price);
        if !price.is_finite() || price <= 0.0 {
            bail!("Invalid execution price: {}", price);
        }
        let total = price * order.quantity as f64;

        match order.side {
            TradeSide::Buy => {
                if total > self.cash {
                    bail!(
                        "Insufficient funds: order costs ${:.2} but only ${:.2} is available",
                        total,
                        self.cash
                    );
                }
                self.cash -= total;
                match self.holding_mut(&order.symbol) {
                    Some(holding) => {
                        let quantity = holding.quantity + order.quantity;
                        holding.avg_price =
                            (holding.avg_price * holding.quantity as f64 + total) / quantity as f64;
                        holding.quantity = quantity;
                    }
                    None => self.holdings.push(Holding {
                        symbol: order.symbol.clone(),
                        quantity: order.quantity,
                        avg_price: price,
                    }),
                }
            }
            TradeSide::Sell => {
                let held = self.holding(&order.symbol).map_or(0, |h| h.quantity);
                if held < order.quantity {
                    bail!(
                        "Insufficient shares to sell: {} held, {} requested",
                        held,
                        order.quantity
                    );
                }
                self.cash += total;
                if let Some(holding) = self.holding_mut(&order.symbol) {
                    holding.quantity -= order.quantity;
                }
                self.holdings.retain(|h| h.quantity > 0);
            }
        }

        let record = TradeRecord {
            id: self.trades.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            symbol: order.symbol.clone(),
            side: order.side,
            quantity: order.quantity,
            price,
            date,
            status: TradeStatus::Filled,
        };
        debug!(?record, cash = self.cash, "Trade filled");
        self.trades.insert(0, record);
        Ok(&self.trades[0])
    }
}

/// Market value and unrealized profit of one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValue {
    pub symbol: String,
    pub quantity: u32,
    pub avg_price: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub unrealized_pnl: f64,
    pub is_mock_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValue {
    pub holdings: Vec<HoldingValue>,
    pub cash: f64,
    pub market_value: f64,
    pub unrealized_pnl: f64,
    pub total_value: f64,
}

/// Values every holding at the price of the matching quote.
///
/// A holding without a quote is valued at its average price, so it adds
/// nothing to the unrealized P&L.
pub fn calculate_portfolio_value(portfolio: &Portfolio, quotes: &[Quote]) -> PortfolioValue {
    let holdings: Vec<HoldingValue> = portfolio
        .holdings
        .iter()
        .map(|holding| {
            let quote = quotes
                .iter()
                .find(|q| q.symbol.eq_ignore_ascii_case(&holding.symbol));
            let current_price = quote.map_or(holding.avg_price, |q| q.current_price);
            let quantity = holding.quantity as f64;
            HoldingValue {
                symbol: holding.symbol.clone(),
                quantity: holding.quantity,
                avg_price: holding.avg_price,
                current_price,
                market_value: current_price * quantity,
                unrealized_pnl: (current_price - holding.avg_price) * quantity,
                is_mock_data: quote.is_none_or(|q| q.is_mock_data),
            }
        })
        .collect();

    let market_value = holdings.iter().map(|h| h.market_value).sum();
    let unrealized_pnl = holdings.iter().map(|h| h.unrealized_pnl).sum();
    PortfolioValue {
        holdings,
        cash: portfolio.cash,
        market_value,
        unrealized_pnl,
        total_value: portfolio.cash + market_value,
    }
}
