//! Completion gateway
//!
//! This module hides the completion provider behind the [`LLMClient`] trait so
//! the HTTP layer and tests never depend on a particular vendor SDK.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that providers implement
//! - [`OpenAIClient`] - OpenAI-compatible chat completions via `async-openai`
//! - [`prompt`] - System prompt and weather clause assembly
//! - [`CompletionGateway`] - Combines a client with the configured system prompt
//!
//! # Example
//!
//! ```ignore
//! use metchat::llm::{CompletionGateway, OpenAIClient};
//! use std::sync::Arc;
//!
//! let client = OpenAIClient::new(key, "https://api.openai.com/v1".into(), "gpt-3.5-turbo".into());
//! let gateway = CompletionGateway::new(Arc::new(client), prompt::DEFAULT_SYSTEM_PROMPT);
//! let reply = gateway.reply(&history, None).await?;
//! ```

/// Core LLM client trait.
pub mod client;
/// Prompt assembly plus the client into a single call.
pub mod gateway;
/// OpenAI chat completions client.
pub mod openai;
/// System prompt construction.
pub mod prompt;

pub use client::LLMClient;
pub use gateway::CompletionGateway;
pub use openai::OpenAIClient;
