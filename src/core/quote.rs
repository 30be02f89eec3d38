//! Quote data model and trend classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Percent move beyond which a series is considered rising or falling.
pub const DIRECTIONAL_THRESHOLD: f64 = 2.0;

/// Percent move beyond which a non-directional series is considered volatile.
pub const VOLATILE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Volatile,
    Flat,
}

impl Trend {
    /// Classifies a percent change into a trend.
    ///
    /// Boundaries are exclusive: exactly `±0.5` is flat and exactly `±2` is volatile.
    pub fn classify(percent_change: f64) -> Self {
        if percent_change > DIRECTIONAL_THRESHOLD {
            Trend::Rising
        } else if percent_change < -DIRECTIONAL_THRESHOLD {
            Trend::Falling
        } else if percent_change.abs() > VOLATILE_THRESHOLD {
            Trend::Volatile
        } else {
            Trend::Flat
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Trend::Rising => "rising",
                Trend::Falling => "falling",
                Trend::Volatile => "volatile",
                Trend::Flat => "flat",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InflationTrend {
    Stable,
    Rising,
    Falling,
}

/// Macro inflation reading attached to every quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationSnapshot {
    pub rate: f64,
    pub month: String,
    pub trend: InflationTrend,
}

impl InflationSnapshot {
    /// The fixed reading used in place of a live macro source.
    pub fn constant() -> Self {
        InflationSnapshot {
            rate: 3.2,
            month: "August 2024".to_string(),
            trend: InflationTrend::Stable,
        }
    }
}

/// A normalized point-in-time snapshot for a ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    pub trend: Trend,
    pub trend_percent: f64,
    pub inflation: InflationSnapshot,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_mock_data: bool,
}

/// Rounds a monetary value to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a volume with K/M suffixes, e.g. `12.3M`.
pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        volume.to_string()
    }
}
