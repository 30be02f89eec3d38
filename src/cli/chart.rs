use super::ui;
use crate::core::history::{PricePoint, Timeframe, generate_history};
use crate::core::quote::format_volume;
use crate::core::MarketDataProvider;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

const BAR_WIDTH: usize = 30;

/// Horizontal bar scaled between the series minimum and maximum.
fn price_bar(price: f64, min: f64, max: f64) -> String {
    let span = max - min;
    let filled = if span > 0.0 {
        (((price - min) / span) * BAR_WIDTH as f64).round() as usize
    } else {
        BAR_WIDTH / 2
    };
    "█".repeat(filled.clamp(1, BAR_WIDTH))
}

pub fn display_history(symbol: &str, timeframe: Timeframe, history: &[PricePoint]) -> String {
    let (min, max) = history
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        });

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Time"),
        ui::header_cell("Price"),
        ui::header_cell("Volume"),
        ui::header_cell(""),
    ]);
    for point in history {
        table.add_row(vec![
            Cell::new(&point.label),
            ui::price_cell(point.price),
            Cell::new(format_volume(point.volume)).set_alignment(CellAlignment::Right),
            Cell::new(price_bar(point.price, min, max)),
        ]);
    }

    let mut output = format!(
        "{} Price Chart ({})\n\n",
        ui::style_text(symbol, ui::StyleType::Title),
        timeframe
    );
    output.push_str(&table.to_string());
    if !history.is_empty() {
        output.push_str(&format!(
            "\n\n{} ${:.2}  {} ${:.2}",
            ui::style_text("Low:", ui::StyleType::Label),
            min,
            ui::style_text("High:", ui::StyleType::Label),
            max
        ));
    }
    output.push_str(&format!(
        "\n{}",
        ui::style_text(
            "Historical points are simulated around the current quote.",
            ui::StyleType::Subtle
        )
    ));
    output
}

pub async fn run(
    provider: &(dyn MarketDataProvider + Send + Sync),
    symbol: &str,
    timeframe: Timeframe,
) -> Result<()> {
    let quote = provider.get_quote(symbol).await;
    let history = generate_history(&quote, timeframe);
    println!("{}", display_history(&quote.symbol, timeframe, &history));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bar_scaling() {
        assert_eq!(price_bar(10.0, 10.0, 20.0).chars().count(), 1);
        assert_eq!(price_bar(20.0, 10.0, 20.0).chars().count(), BAR_WIDTH);
        assert_eq!(price_bar(15.0, 10.0, 20.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(price_bar(5.0, 5.0, 5.0).chars().count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_display_history_summary() {
        let history = vec![
            PricePoint {
                label: "Day 1".to_string(),
                price: 98.0,
                volume: 1_500,
            },
            PricePoint {
                label: "Now".to_string(),
                price: 102.5,
                volume: 2_000_000,
            },
        ];

        let output = display_history("IBM", Timeframe::OneWeek, &history);
        assert!(output.contains("IBM"));
        assert!(output.contains("(1W)"));
        assert!(output.contains("$98.00"));
        assert!(output.contains("$102.50"));
        assert!(output.contains("2.0M"));
    }
}
