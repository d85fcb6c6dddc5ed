//! # metchat - weather-aware chat relay
//!
//! An HTTP relay that forwards chat messages to an OpenAI-compatible
//! completion API. When a message asks about the weather in a UK city, the
//! current Met Office forecast for that city is added to the system prompt
//! first. A standalone weather lookup endpoint is also exposed.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `metchat-server` binary
//! 2. **As a library** - Build an [`AppState`] with your own clients and
//!    mount [`api::routes::create_router`]
//!
//! ### Library Example
//!
//! ```rust,ignore
//! use metchat::{AppState, RelayConfig, api::routes::build_app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RelayConfig::load_or_default("metchat.toml")?;
//!     let state = AppState::from_config(config)?;
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, build_app(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers and routes
//! - [`llm`] - Completion client and prompt assembly
//! - [`memory`] - Bounded per-session conversation history
//! - [`weather`] - Intent detection, geocoding and Met Office forecasts
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - TOML configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
#[allow(missing_docs)]
pub mod api;
/// Completion provider clients and prompt assembly.
#[allow(missing_docs)]
pub mod llm;
/// Conversation history buffers.
#[allow(missing_docs)]
pub mod memory;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities.
#[allow(missing_docs)]
pub mod utils;
/// Weather intent detection and forecast lookup.
#[allow(missing_docs)]
pub mod weather;

// Re-export commonly used types
pub use llm::{CompletionGateway, LLMClient, OpenAIClient};
pub use memory::{ConversationBuffer, ConversationStore};
pub use types::{AppError, Result};
pub use utils::toml_config::{ConfigError, RelayConfig};
pub use weather::{ForecastClient, MetOfficeClient};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration
    pub config: Arc<RelayConfig>,
    /// Completion client plus system prompt
    pub gateway: CompletionGateway,
    /// Forecast lookups
    pub weather: Arc<dyn ForecastClient>,
    /// Per-session conversation history
    pub conversations: Arc<ConversationStore>,
}

impl AppState {
    /// Assemble state from already-built clients
    pub fn new(
        config: RelayConfig,
        llm: Arc<dyn LLMClient>,
        weather: Arc<dyn ForecastClient>,
    ) -> Self {
        let gateway = CompletionGateway::new(llm, config.llm.system_prompt());
        let conversations = Arc::new(ConversationStore::new(
            config.conversation.history_limit,
            config.conversation.max_sessions,
        ));

        Self {
            config: Arc::new(config),
            gateway,
            weather,
            conversations,
        }
    }

    /// Build the OpenAI and Met Office clients described by `config`
    pub fn from_config(config: RelayConfig) -> Result<Self> {
        let llm = OpenAIClient::new(
            config.llm_api_key()?,
            config.llm.api_base.clone(),
            config.llm.model.clone(),
        );
        let weather = MetOfficeClient::from_config(&config.weather, config.weather_api_key())?;

        Ok(Self::new(config, Arc::new(llm), Arc::new(weather)))
    }
}
