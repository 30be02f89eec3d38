//! Synthetic price history for charting a quote.

use crate::core::quote::Quote;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const HISTORY_VOLATILITY: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Timeframe {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Timeframe::OneDay => "1D",
                Timeframe::OneWeek => "1W",
                Timeframe::OneMonth => "1M",
                Timeframe::ThreeMonths => "3M",
                Timeframe::OneYear => "1Y",
            }
        )
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1D" => Ok(Timeframe::OneDay),
            "1W" => Ok(Timeframe::OneWeek),
            "1M" => Ok(Timeframe::OneMonth),
            "3M" => Ok(Timeframe::ThreeMonths),
            "1Y" => Ok(Timeframe::OneYear),
            _ => Err(anyhow::anyhow!("Invalid timeframe: {}", s)),
        }
    }
}

impl Timeframe {
    pub fn points(&self) -> usize {
        match self {
            Timeframe::OneDay => 24,
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::OneYear => 365,
        }
    }

    fn label(&self, index: usize) -> String {
        match self {
            Timeframe::OneDay => format!("{index}:00"),
            Timeframe::OneWeek => format!("Day {}", index + 1),
            Timeframe::OneMonth => format!("{}", index + 1),
            Timeframe::ThreeMonths => format!("Week {}", index / 7 + 1),
            Timeframe::OneYear => format!("Month {}", index / 30 + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub label: String,
    pub price: f64,
    pub volume: u64,
}

pub fn generate_history(quote: &Quote, timeframe: Timeframe) -> Vec<PricePoint> {
    generate_history_with(quote, timeframe, &mut rand::rng())
}

/// Interpolates from the previous close towards the current price with noise.
///
/// Prices never drop below half of the previous close. The series ends with a
/// `"Now"` point carrying the quote's own price and volume.
pub fn generate_history_with<R: Rng>(
    quote: &Quote,
    timeframe: Timeframe,
    rng: &mut R,
) -> Vec<PricePoint> {
    let base = quote.current_price - quote.change;
    let points = timeframe.points();
    let volume = quote.volume as f64;

    let mut history: Vec<PricePoint> = (0..points)
        .map(|i| {
            let noise = (rng.random::<f64>() - 0.5) * HISTORY_VOLATILITY * base;
            let price = base + quote.change * i as f64 / points as f64 + noise;
            PricePoint {
                label: timeframe.label(i),
                price: price.max(base * 0.5),
                volume: (rng.random::<f64>() * volume * 0.1 + volume * 0.05).floor() as u64,
            }
        })
        .collect();

    history.push(PricePoint {
        label: "Now".to_string(),
        price: quote.current_price,
        volume: quote.volume,
    });
    history
}
