//! Mock implementations for testing.
//!
//! This module provides mock completion and forecast clients that can be used
//! across different test files without duplication.

use async_trait::async_trait;
use metchat::types::{AppError, Message, Result, WeatherReport};
use metchat::utils::toml_config::RelayConfig;
use metchat::{AppState, ForecastClient, LLMClient};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock LLM client with a fixed reply.
///
/// Every request's message list is recorded so tests can inspect the prompt
/// that would have been sent.
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<Vec<Message>> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_history(&self, messages: &[Message]) -> Result<String> {
        self.requests.lock().push(messages.to_vec());
        if self.should_fail {
            return Err(AppError::Upstream("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// What the mock forecast client does when asked.
pub enum ForecastBehaviour {
    Report(WeatherReport),
    NotFound,
    Unauthorized,
    Upstream,
}

/// Mock forecast client that counts lookups.
pub struct MockForecastClient {
    behaviour: ForecastBehaviour,
    calls: AtomicUsize,
    cities: Mutex<Vec<String>>,
}

impl MockForecastClient {
    pub fn new(behaviour: ForecastBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
            cities: Mutex::new(Vec::new()),
        }
    }

    /// Always returns light rain at 12°C with an 80% chance of precipitation.
    pub fn rainy() -> Self {
        Self::new(ForecastBehaviour::Report(rainy_report("London")))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cities(&self) -> Vec<String> {
        self.cities.lock().clone()
    }
}

#[async_trait]
impl ForecastClient for MockForecastClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cities.lock().push(city.to_string());

        match &self.behaviour {
            ForecastBehaviour::Report(report) => Ok(WeatherReport {
                city: city.to_string(),
                ..report.clone()
            }),
            ForecastBehaviour::NotFound => Err(AppError::NotFound(format!(
                "Could not find '{}' in the UK",
                city
            ))),
            ForecastBehaviour::Unauthorized => Err(AppError::Unauthorized(
                "Invalid Met Office API key".to_string(),
            )),
            ForecastBehaviour::Upstream => Err(AppError::Upstream("API error: 503".to_string())),
        }
    }
}

pub fn rainy_report(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        description: "light rain".to_string(),
        temperature_celsius: 12.0,
        precipitation_probability: 80.0,
        period_label: "2024-05-01T12:00Z".to_string(),
    }
}

/// State wired to the given mocks with default configuration.
pub fn test_state(llm: Arc<MockLLMClient>, weather: Arc<MockForecastClient>) -> AppState {
    AppState::new(RelayConfig::default(), llm, weather)
}
