use super::ui;
use crate::core::market::get_quotes;
use crate::core::quote::{Quote, format_volume};
use crate::core::MarketDataProvider;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn display_watchlist(quotes: &[Quote]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Price"),
        ui::header_cell("Change (%)"),
        ui::header_cell("Volume"),
        ui::header_cell("Trend"),
    ]);

    for quote in quotes {
        let symbol = if quote.is_mock_data {
            format!("{}*", quote.symbol)
        } else {
            quote.symbol.clone()
        };
        table.add_row(vec![
            Cell::new(symbol),
            ui::price_cell(quote.current_price),
            ui::change_cell(quote.change_percent),
            Cell::new(format_volume(quote.volume)).set_alignment(CellAlignment::Right),
            ui::trend_cell(quote.trend),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Market Dashboard", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    let gainers = quotes.iter().filter(|q| q.change_percent >= 0.0).count();
    output.push_str(&format!(
        "\n\n{} {} up, {} down",
        ui::style_text("Summary:", ui::StyleType::Label),
        ui::style_text(&gainers.to_string(), ui::StyleType::Highlight),
        quotes.len() - gainers
    ));
    if quotes.iter().any(|q| q.is_mock_data) {
        output.push_str(&format!(
            "\n{}",
            ui::style_text("* simulated values", ui::StyleType::Warning)
        ));
    }
    output
}

pub async fn run(
    provider: &(dyn MarketDataProvider + Send + Sync),
    watchlist: &[String],
) -> Result<()> {
    if watchlist.is_empty() {
        println!("Watchlist is empty. Add symbols to the config file to see them here.");
        return Ok(());
    }

    let pb = ui::new_progress_bar(watchlist.len() as u64);
    pb.set_message("Fetching quotes...");
    let quotes = get_quotes(provider, watchlist, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    println!("{}", display_watchlist(&quotes));
    Ok(())
}
