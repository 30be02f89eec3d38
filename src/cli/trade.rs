use super::ui;
use crate::core::portfolio::{Order, Portfolio, TradeRecord};
use crate::core::quote::Quote;
use crate::core::MarketDataProvider;
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Summary of a filled order and the position it leaves behind.
pub fn display_fill(record: &TradeRecord, quote: &Quote, after: &Portfolio) -> String {
    let mut output = format!(
        "{} {} {} shares of {} at ${:.2}\n\n",
        ui::style_text("Filled:", ui::StyleType::Highlight),
        record.side.to_string().to_uppercase(),
        record.quantity,
        record.symbol,
        record.price
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    let total = record.price * record.quantity as f64;
    table.add_row(vec![Cell::new("Order Total"), ui::price_cell(total)]);
    table.add_row(vec![Cell::new("Market Price"), ui::price_cell(quote.current_price)]);
    match after.holding(&record.symbol) {
        Some(holding) => {
            table.add_row(vec![Cell::new("Shares Held"), Cell::new(holding.quantity)]);
            table.add_row(vec![Cell::new("Avg Price"), ui::price_cell(holding.avg_price)]);
        }
        None => {
            table.add_row(vec![Cell::new("Shares Held"), Cell::new("0 (position closed)")]);
        }
    }
    table.add_row(vec![Cell::new("Cash Balance"), ui::price_cell(after.cash)]);
    output.push_str(&table.to_string());

    if quote.is_mock_data {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                "Live data unavailable, market price is simulated.",
                ui::StyleType::Warning
            )
        ));
    }
    output.push_str(&format!(
        "\n{}",
        ui::style_text(
            "Paper trade only. The config file is not modified.",
            ui::StyleType::Subtle
        )
    ));
    output
}

pub async fn run(
    provider: &(dyn MarketDataProvider + Send + Sync),
    portfolio: &Portfolio,
    order: Order,
) -> Result<()> {
    let quote = provider.get_quote(&order.symbol).await;
    let mut simulated = portfolio.clone();
    let today = chrono::Local::now().date_naive();

    let record = simulated
        .execute(&order, quote.current_price, today)
        .with_context(|| {
            format!(
                "Order rejected: {} {} {} for ${:.2}",
                order.side,
                order.quantity,
                order.symbol,
                order.total(quote.current_price)
            )
        })?
        .clone();

    println!("{}", display_fill(&record, &quote, &simulated));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::portfolio::{OrderType, TradeSide};
    use crate::providers::mock::generate_mock_quote_with;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fill(order: Order, price: f64) -> (TradeRecord, Quote, Portfolio) {
        let mut quote = generate_mock_quote_with(&order.symbol, &mut StdRng::seed_from_u64(2));
        quote.current_price = price;
        let mut portfolio = Portfolio::default();
        let record = portfolio
            .execute(&order, price, NaiveDate::from_ymd_opt(2024, 8, 30).unwrap())
            .unwrap()
            .clone();
        (record, quote, portfolio)
    }

    #[test]
    fn test_fill_shows_resulting_position() {
        let order = Order::new(TradeSide::Buy, "AAPL", 5, OrderType::Market);
        let (record, quote, after) = fill(order, 180.25);

        let output = display_fill(&record, &quote, &after);
        assert!(output.contains("BUY 5 shares of AAPL at $180.25"));
        assert!(output.contains("$901.25"));
        // (175.50 * 10 + 901.25) / 15
        assert!(output.contains("$177.08"));
        assert!(output.contains("$24098.75"));
        assert!(output.contains("market price is simulated"));
        assert!(output.contains("Paper trade only"));
    }

    #[test]
    fn test_fill_reports_closed_position() {
        let order = Order::new(TradeSide::Sell, "TSLA", 5, OrderType::Limit(230.0));
        let (record, mut quote, after) = fill(order, 215.80);
        quote.is_mock_data = false;

        let output = display_fill(&record, &quote, &after);
        assert!(output.contains("SELL 5 shares of TSLA at $230.00"));
        assert!(output.contains("position closed"));
        assert!(!output.contains("market price is simulated"));
    }
}
