//! System prompt assembly.

use crate::types::{Message, WeatherReport};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly, concise AI chatbot. For weather queries, \
provide practical advice (e.g., mention umbrellas for rain, sunscreen for sun) based on the provided \
weather data, and keep the tone conversational.";

/// Sentence appended to the system prompt when a forecast is available.
pub fn weather_clause(report: &WeatherReport) -> String {
    format!(
        " Today's weather in {} is {} with a temperature of {}°C and {}% chance of precipitation.",
        report.city,
        report.description,
        report.temperature_celsius,
        report.precipitation_probability
    )
}

/// System turn followed by the conversation history.
pub fn build_messages(
    system_prompt: &str,
    history: &[Message],
    weather: Option<&WeatherReport>,
) -> Vec<Message> {
    let mut system = system_prompt.to_string();
    if let Some(report) = weather {
        system.push_str(&weather_clause(report));
    }

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(system));
    messages.extend_from_slice(history);
    messages
}
