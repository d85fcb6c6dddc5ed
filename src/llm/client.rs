//! LLM client abstraction
//!
//! The relay only needs one operation from a completion provider: given the
//! full message list (system prompt first, then history), return the
//! assistant's reply text.

use crate::types::{Message, Result};
use async_trait::async_trait;

/// Chat completion provider.
///
/// Implementations make a single request and map any transport or API
/// failure to [`AppError::Upstream`](crate::types::AppError::Upstream).
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a reply for an ordered conversation
    async fn generate_with_history(&self, messages: &[Message]) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}
