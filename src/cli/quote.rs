use super::ui;
use crate::core::quote::{Quote, format_volume};
use crate::core::MarketDataProvider;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

impl Quote {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);

        let rows = [
            ("Price", ui::price_cell(self.current_price)),
            (
                "Change",
                Cell::new(format!("{:+.2}", self.change)).set_alignment(CellAlignment::Right),
            ),
            ("Change (%)", ui::change_cell(self.change_percent)),
            ("Open", ui::price_cell(self.open)),
            ("High", ui::price_cell(self.high)),
            ("Low", ui::price_cell(self.low)),
            ("Previous Close", ui::price_cell(self.previous_close)),
            (
                "Volume",
                Cell::new(format_volume(self.volume)).set_alignment(CellAlignment::Right),
            ),
            ("Trend", ui::trend_cell(self.trend)),
            ("Trend Window (%)", ui::change_cell(self.trend_percent)),
            (
                "Inflation",
                Cell::new(format!(
                    "{:.1}% ({:?}, {})",
                    self.inflation.rate, self.inflation.trend, self.inflation.month
                )),
            ),
        ];
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label), value]);
        }

        let mut output = format!(
            "Quote: {}\n\n",
            ui::style_text(&self.symbol, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("As of {}", self.timestamp.to_rfc3339()),
                ui::StyleType::Subtle
            )
        ));
        if self.is_mock_data {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    "Live data unavailable, showing simulated values.",
                    ui::StyleType::Warning
                )
            ));
        }

        output
    }
}

pub async fn run(
    provider: &(dyn MarketDataProvider + Send + Sync),
    symbol: &str,
    json: bool,
) -> Result<()> {
    let quote = provider.get_quote(symbol).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("{}", quote.display_as_table());
    }
    Ok(())
}
