use crate::llm::client::LLMClient;
use crate::types::{AppError, Message, MessageRole, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    /// Failed requests are surfaced immediately; the SDK's retry loop is disabled.
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(config).with_backoff(no_retry),
            model,
        }
    }
}

fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage> {
    let content = message.content.clone();
    let converted = match message.role {
        MessageRole::System => ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage::from(content),
        ),
        MessageRole::User => {
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(content))
        }
        MessageRole::Assistant => ChatCompletionRequestMessage::Assistant(
            ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map_err(|e| AppError::Internal(format!("Failed to build message: {}", e)))?,
        ),
    };
    Ok(converted)
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate_with_history(&self, messages: &[Message]) -> Result<String> {
        let chat_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(chat_messages)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::Upstream(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::Upstream("No response from OpenAI".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
