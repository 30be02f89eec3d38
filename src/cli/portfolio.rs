use super::ui;
use crate::core::market::get_quotes;
use crate::core::portfolio::{
    Portfolio, PortfolioValue, TradeRecord, calculate_portfolio_value,
};
use crate::core::MarketDataProvider;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

const RECENT_TRADES: usize = 5;

impl PortfolioValue {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Symbol"),
            ui::header_cell("Shares"),
            ui::header_cell("Avg Price"),
            ui::header_cell("Price"),
            ui::header_cell("Value"),
            ui::header_cell("Unrealized P&L"),
        ]);

        for holding in &self.holdings {
            let symbol = if holding.is_mock_data {
                format!("{}*", holding.symbol)
            } else {
                holding.symbol.clone()
            };
            table.add_row(vec![
                Cell::new(symbol),
                Cell::new(holding.quantity).set_alignment(CellAlignment::Right),
                ui::price_cell(holding.avg_price),
                ui::price_cell(holding.current_price),
                ui::price_cell(holding.market_value),
                ui::pnl_cell(holding.unrealized_pnl),
            ]);
        }

        let mut output = format!("{}\n\n", ui::style_text("Portfolio", ui::StyleType::Title));
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} ${:.2}  {} ${:.2}  {} ${:.2}",
            ui::style_text("Cash:", ui::StyleType::Label),
            self.cash,
            ui::style_text("Holdings:", ui::StyleType::Label),
            self.market_value,
            ui::style_text("Total:", ui::StyleType::Label),
            self.total_value
        ));
        output.push_str(&format!(
            "\n{} {}",
            ui::style_text("Unrealized P&L:", ui::StyleType::Label),
            ui::format_pnl(self.unrealized_pnl)
        ));
        if self.holdings.iter().any(|h| h.is_mock_data) {
            output.push_str(&format!(
                "\n{}",
                ui::style_text("* simulated values", ui::StyleType::Warning)
            ));
        }
        output
    }
}

pub fn display_trades(trades: &[TradeRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Date"),
        ui::header_cell("Side"),
        ui::header_cell("Symbol"),
        ui::header_cell("Shares"),
        ui::header_cell("Price"),
        ui::header_cell("Status"),
    ]);
    for trade in trades.iter().take(RECENT_TRADES) {
        table.add_row(vec![
            Cell::new(trade.id),
            Cell::new(trade.date),
            ui::side_cell(trade.side),
            Cell::new(&trade.symbol),
            Cell::new(trade.quantity).set_alignment(CellAlignment::Right),
            ui::price_cell(trade.price),
            Cell::new(trade.status),
        ]);
    }
    format!(
        "{}\n\n{}",
        ui::style_text("Recent Trades", ui::StyleType::Title),
        table
    )
}

pub async fn run(
    provider: &(dyn MarketDataProvider + Send + Sync),
    portfolio: &Portfolio,
    json: bool,
) -> Result<()> {
    let symbols = portfolio.symbols();
    let pb = ui::new_progress_bar(symbols.len() as u64);
    pb.set_message("Valuing holdings...");
    let quotes = get_quotes(provider, &symbols, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    let value = calculate_portfolio_value(portfolio, &quotes);
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", value.display_as_table());
    if !portfolio.trades.is_empty() {
        println!("\n{}", display_trades(&portfolio.trades));
    }
    Ok(())
}
