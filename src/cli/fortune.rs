use super::ui;
use crate::core::fortune::{Fortune, generate_fortune};
use crate::core::quote::Quote;
use crate::core::MarketDataProvider;
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

#[derive(Serialize)]
struct FortuneReading<'a> {
    quote: &'a Quote,
    fortune: &'a Fortune,
}

impl Fortune {
    pub fn display_for(&self, quote: &Quote) -> String {
        let mut output = format!(
            "{} {} for {}\n\n",
            self.emoji,
            ui::style_text(&self.category, ui::StyleType::Title),
            ui::style_text(&quote.symbol, ui::StyleType::Label),
        );

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Price"),
            ui::header_cell("Change (%)"),
            ui::header_cell("Trend"),
            ui::header_cell("Confidence"),
        ]);
        table.add_row(vec![
            ui::price_cell(quote.current_price),
            ui::change_cell(quote.change_percent),
            ui::trend_cell(quote.trend),
            Cell::new(format!("{}%", self.confidence)),
        ]);
        output.push_str(&table.to_string());

        output.push_str(&format!("\n\n{}\n", self.message));
        output.push_str(&format!(
            "{}\n\n",
            ui::style_text(&self.inflation_context, ui::StyleType::Subtle)
        ));
        output.push_str(&ui::style_text("Advice", ui::StyleType::Label));
        for advice in &self.advice {
            output.push_str(&format!("\n  • {advice}"));
        }

        if quote.is_mock_data {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text(
                    "Live data unavailable, this reading uses simulated values.",
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
    let fortune = generate_fortune(&quote);

    if json {
        let reading = FortuneReading {
            quote: &quote,
            fortune: &fortune,
        };
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!("{}", fortune.display_for(&quote));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::core::fortune::generate_fortune_with;
    use crate::providers::mock::generate_mock_quote_with;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fortune_display_lists_message_and_advice() {
        let mut rng = StdRng::seed_from_u64(21);
        let quote = generate_mock_quote_with("META", &mut rng);
        let fortune = generate_fortune_with(&quote, &mut rng);

        let output = fortune.display_for(&quote);
        assert!(output.contains(&fortune.category));
        assert!(output.contains(&fortune.message));
        assert!(output.contains(&fortune.inflation_context));
        for advice in &fortune.advice {
            assert!(output.contains(advice.as_str()));
        }
        assert!(output.contains(&format!("{}%", fortune.confidence)));
    }
}
