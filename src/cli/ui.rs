use crate::core::portfolio::TradeSide;
use crate::core::quote::Trend;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Highlight,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Highlight => style(text).green().bold(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned cell for a price.
pub fn price_cell(price: f64) -> Cell {
    Cell::new(format!("${price:.2}")).set_alignment(CellAlignment::Right)
}

/// Creates a cell for displaying percentage change with color coding.
pub fn change_cell(change: f64) -> Cell {
    let text = format!("{change:+.2}%");
    let color = if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text).fg(color).set_alignment(CellAlignment::Right)
}

/// Signed dollar amount, e.g. `+$12.50` or `-$3.00`.
pub fn format_pnl(amount: f64) -> String {
    let sign = if amount < 0.0 { '-' } else { '+' };
    format!("{sign}${:.2}", amount.abs())
}

pub fn pnl_cell(amount: f64) -> Cell {
    let color = if amount < 0.0 { Color::Red } else { Color::Green };
    Cell::new(format_pnl(amount))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

pub fn side_cell(side: TradeSide) -> Cell {
    let color = match side {
        TradeSide::Buy => Color::Green,
        TradeSide::Sell => Color::Red,
    };
    Cell::new(side.to_string().to_uppercase())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Rising => Color::Green,
        Trend::Falling => Color::Red,
        Trend::Volatile => Color::Magenta,
        Trend::Flat => Color::DarkGrey,
    }
}

/// Trend name prefixed with its fortune emoji.
pub fn trend_cell(trend: Trend) -> Cell {
    Cell::new(format!("{} {}", trend.category().emoji, trend))
        .fg(trend_color(trend))
        .add_attribute(Attribute::Bold)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64) -> ProgressBar {
    let template =
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
