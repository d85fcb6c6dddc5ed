//! Met Office significant-weather codes.
//!
//! The DataHub forecasts report conditions as a small integer. Code 4 is
//! unused by the provider.

use serde_json::Value;

/// Description used for any code missing from [`WEATHER_CODES`].
pub const UNKNOWN_WEATHER: &str = "unknown weather";

/// Provider code to plain-English description.
pub const WEATHER_CODES: &[(&str, &str)] = &[
    ("0", "clear night"),
    ("1", "sunny day"),
    ("2", "partly cloudy night"),
    ("3", "partly cloudy day"),
    ("5", "mist"),
    ("6", "fog"),
    ("7", "cloudy"),
    ("8", "overcast"),
    ("9", "light rain shower night"),
    ("10", "light rain shower day"),
    ("11", "drizzle"),
    ("12", "light rain"),
    ("13", "heavy rain shower night"),
    ("14", "heavy rain shower day"),
    ("15", "torrential rain"),
    ("16", "sleet shower night"),
    ("17", "sleet shower day"),
    ("18", "sleet"),
    ("19", "hail shower night"),
    ("20", "hail shower day"),
    ("21", "hail"),
    ("22", "light snow shower night"),
    ("23", "light snow shower day"),
    ("24", "light snow"),
    ("25", "heavy snow shower night"),
    ("26", "heavy snow shower day"),
    ("27", "thunder shower night"),
    ("28", "thunder shower day"),
    ("29", "thunder"),
];

/// Look up the description for a code given as text.
pub fn describe(code: &str) -> &'static str {
    let code = code.trim();
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
        .unwrap_or(UNKNOWN_WEATHER)
}

/// Look up the description for a code that arrived as a JSON number or string.
pub fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::String(s) => describe(s),
        Value::Number(n) => match n.as_u64() {
            Some(code) => describe(&code.to_string()),
            None => UNKNOWN_WEATHER,
        },
        _ => UNKNOWN_WEATHER,
    }
}
