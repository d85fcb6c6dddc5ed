//! Keyword-based detection of weather questions.
//!
//! This is a best-effort classifier. Its contract:
//!
//! 1. A message is a weather query when its lower-cased text contains any of
//!    [`WEATHER_KEYWORDS`] as a substring (so "train" counts as "rain").
//! 2. The city is the token after the first standalone `in`, when there is one.
//! 3. Otherwise the last token is the city, unless it is a keyword itself or
//!    `today`/`tomorrow`.
//!
//! Tokens are split on whitespace only, so multi-word cities come back as their
//! first word and punctuation stays attached.

pub const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "umbrella",
    "rain",
    "sunny",
    "snow",
    "cloudy",
    "forecast",
    "temperature",
];

const DAY_WORDS: &[&str] = &["today", "tomorrow"];

/// Outcome of [`extract_weather_intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherIntent {
    pub is_weather_query: bool,
    pub city: Option<String>,
}

impl WeatherIntent {
    fn none() -> Self {
        Self {
            is_weather_query: false,
            city: None,
        }
    }

    fn weather(city: Option<String>) -> Self {
        Self {
            is_weather_query: true,
            city,
        }
    }
}

pub fn extract_weather_intent(message: &str) -> WeatherIntent {
    let lower = message.to_lowercase();
    if !WEATHER_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return WeatherIntent::none();
    }

    let words: Vec<&str> = lower.split_whitespace().collect();

    let after_in = words
        .iter()
        .position(|w| *w == "in")
        .and_then(|pos| words.get(pos + 1));
    if let Some(city) = after_in {
        return WeatherIntent::weather(Some(capitalize(city)));
    }

    match words.last() {
        Some(last) if !WEATHER_KEYWORDS.contains(last) && !DAY_WORDS.contains(last) => {
            WeatherIntent::weather(Some(capitalize(last)))
        }
        _ => WeatherIntent::weather(None),
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
