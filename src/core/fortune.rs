//! Maps a quote to its fortune: category, message, confidence and advice.
use crate::core::quote::{InflationTrend, Quote, Trend};
use rand::Rng;
use serde::{Deserialize, Serialize};

const BASE_CONFIDENCE: u8 = 70;
const MAX_CONFIDENCE: u8 = 95;
const MAX_ADVICE: usize = 3;

const HIGH_VOLUME: u64 = 1_000_000;
const LOW_VOLUME: u64 = 100_000;

const HIGH_VOLUME_ADVICE: &str = "High volume suggests strong conviction in the move";
const LOW_VOLUME_ADVICE: &str = "Low volume means the move might not be sustainable";
const HIGH_INFLATION_ADVICE: &str =
    "High inflation environment - consider inflation-protected assets";
const LOW_INFLATION_ADVICE: &str = "Low inflation environment - growth stocks may perform well";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflationBucket {
    Low,
    Moderate,
    High,
}

impl InflationBucket {
    pub fn from_rate(rate: f64) -> Self {
        if rate < 2.0 {
            InflationBucket::Low
        } else if rate > 4.0 {
            InflationBucket::High
        } else {
            InflationBucket::Moderate
        }
    }
}

/// Display bundle bound to a trend.
#[derive(Debug)]
pub struct FortuneCategory {
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub messages: [&'static str; 5],
}

static RISING: FortuneCategory = FortuneCategory {
    name: "Rising Fortune",
    emoji: "🌞",
    color: "fortune-green",
    messages: [
        "Golden rays light your path 🌞. Growth and prosperity await!",
        "The stars align in your favor ✨. Your investment shines bright!",
        "Fortune smiles upon you 😊. The market dances to your tune!",
        "Like a phoenix rising 🦅, your stock soars to new heights!",
        "The winds of fortune blow strong 💨. Success is in the air!",
    ],
};

static FALLING: FortuneCategory = FortuneCategory {
    name: "Storm Warning",
    emoji: "⛈️",
    color: "fortune-red",
    messages: [
        "Beware the storm ⛈️, traveler. Clouds gather over markets.",
        "The tide turns against you 🌊. Patience will be your ally.",
        "Dark clouds loom ahead ☁️. But every storm passes in time.",
        "The market tests your resolve 💪. Stay strong through the tempest.",
        "Like winter's chill ❄️, this too shall pass with spring's warmth.",
    ],
};

static VOLATILE: FortuneCategory = FortuneCategory {
    name: "Uncertain Times",
    emoji: "🎭",
    color: "fortune-purple",
    messages: [
        "The dice are rolling 🎭. Fortune favors the bold... or the careful.",
        "Like a pendulum swinging ⚖️, the market seeks its balance.",
        "The winds of change blow wild 🌪️. Adaptability is your strength.",
        "In chaos lies opportunity 🎪. The wise see patterns in the storm.",
        "The market dances to its own rhythm 💃. Learn to follow its lead.",
    ],
};

static FLAT: FortuneCategory = FortuneCategory {
    name: "Neutral Path",
    emoji: "😐",
    color: "fortune-gray",
    messages: [
        "Patience is your ally 😐. The river flows, yet slowly.",
        "Like a calm lake 🌊, your stock finds its peaceful center.",
        "Steady as the mountains 🏔️, your investment stands firm.",
        "The market breathes slowly 🫁. Sometimes stillness brings wisdom.",
        "In the quiet moments 🤫, great opportunities often hide.",
    ],
};

impl Trend {
    pub fn category(&self) -> &'static FortuneCategory {
        match self {
            Trend::Rising => &RISING,
            Trend::Falling => &FALLING,
            Trend::Volatile => &VOLATILE,
            Trend::Flat => &FLAT,
        }
    }

    fn advice(&self) -> [&'static str; 2] {
        match self {
            Trend::Rising => [
                "Consider taking some profits if you're up significantly",
                "Monitor for signs of overvaluation",
            ],
            Trend::Falling => [
                "This might be a buying opportunity if fundamentals are strong",
                "Set stop-losses to protect your capital",
            ],
            Trend::Volatile => [
                "Consider dollar-cost averaging to smooth out volatility",
                "High volatility can mean high opportunity",
            ],
            Trend::Flat => [
                "Patience is key - sometimes slow and steady wins",
                "Look for catalysts that might break the trend",
            ],
        }
    }
}

/// Looks up the inflation commentary for a bucket and trend.
pub fn inflation_context(bucket: InflationBucket, trend: Trend) -> &'static str {
    match (bucket, trend) {
        (InflationBucket::Low, Trend::Rising) => {
            "With inflation low, your gains shine even brighter! 💎"
        }
        (InflationBucket::Low, Trend::Falling) => {
            "Low inflation provides a soft cushion for your journey. 🛡️"
        }
        (InflationBucket::Low, Trend::Volatile) => {
            "Low inflation means less turbulence in your path. 🌤️"
        }
        (InflationBucket::Low, Trend::Flat) => {
            "Stable prices create a peaceful backdrop for your investment. 🕊️"
        }
        (InflationBucket::Moderate, Trend::Rising) => {
            "Moderate inflation adds fuel to your rising fortune! 🚀"
        }
        (InflationBucket::Moderate, Trend::Falling) => {
            "Inflation's gentle pressure tests your resolve. 💪"
        }
        (InflationBucket::Moderate, Trend::Volatile) => {
            "Inflation's dance creates interesting market rhythms. 💃"
        }
        (InflationBucket::Moderate, Trend::Flat) => {
            "Steady inflation keeps the economic engine humming. ⚙️"
        }
        (InflationBucket::High, Trend::Rising) => {
            "Even high inflation cannot dim your star's bright shine! ⭐"
        }
        (InflationBucket::High, Trend::Falling) => {
            "High inflation makes the storm more challenging to weather. 🌪️"
        }
        (InflationBucket::High, Trend::Volatile) => {
            "Inflation's wild swings add spice to the market's story. 🌶️"
        }
        (InflationBucket::High, Trend::Flat) => {
            "High inflation makes your steady path even more admirable. 🏆"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fortune {
    pub category: String,
    pub emoji: String,
    pub color: String,
    pub message: String,
    pub inflation_context: String,
    pub confidence: u8,
    pub advice: Vec<String>,
}

/// Generates a fortune using the thread-local RNG for message selection.
pub fn generate_fortune(quote: &Quote) -> Fortune {
    generate_fortune_with(quote, &mut rand::rng())
}

/// Generates a fortune, picking the message with the supplied RNG.
pub fn generate_fortune_with<R: Rng>(quote: &Quote, rng: &mut R) -> Fortune {
    let bucket = InflationBucket::from_rate(quote.inflation.rate);
    let category = quote.trend.category();
    let message = category.messages[rng.random_range(0..category.messages.len())];

    Fortune {
        category: category.name.to_string(),
        emoji: category.emoji.to_string(),
        color: category.color.to_string(),
        message: message.to_string(),
        inflation_context: inflation_context(bucket, quote.trend).to_string(),
        confidence: calculate_confidence(quote),
        advice: generate_advice(quote),
    }
}

pub fn calculate_confidence(quote: &Quote) -> u8 {
    let mut confidence = BASE_CONFIDENCE;

    let movement = quote.change_percent.abs();
    if movement > 5.0 {
        confidence += 15;
    } else if movement > 2.0 {
        confidence += 10;
    }

    if quote.volume > HIGH_VOLUME {
        confidence += 10;
    } else if quote.volume > LOW_VOLUME {
        confidence += 5;
    }

    if quote.inflation.trend == InflationTrend::Stable {
        confidence += 5;
    }

    confidence.min(MAX_CONFIDENCE)
}

/// Trend advice first, then the volume clause, then the inflation clause, capped at three.
pub fn generate_advice(quote: &Quote) -> Vec<String> {
    let mut advice: Vec<&str> = quote.trend.advice().to_vec();

    if quote.volume > HIGH_VOLUME {
        advice.push(HIGH_VOLUME_ADVICE);
    } else if quote.volume < LOW_VOLUME {
        advice.push(LOW_VOLUME_ADVICE);
    }

    if quote.inflation.rate > 4.0 {
        advice.push(HIGH_INFLATION_ADVICE);
    } else if quote.inflation.rate < 2.0 {
        advice.push(LOW_INFLATION_ADVICE);
    }

    advice.into_iter().take(MAX_ADVICE).map(String::from).collect()
}
