use crate::llm::client::LLMClient;
use crate::llm::prompt;
use crate::types::{Message, Result, WeatherReport};
use std::sync::Arc;

/// Packages the system prompt, history and optional forecast into one
/// completion request.
#[derive(Clone)]
pub struct CompletionGateway {
    client: Arc<dyn LLMClient>,
    system_prompt: String,
}

impl CompletionGateway {
    pub fn new(client: Arc<dyn LLMClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
        }
    }

    pub async fn reply(
        &self,
        history: &[Message],
        weather: Option<&WeatherReport>,
    ) -> Result<String> {
        let messages = prompt::build_messages(&self.system_prompt, history, weather);
        tracing::debug!(
            model = self.client.model_name(),
            turns = messages.len(),
            "Requesting completion"
        );
        self.client.generate_with_history(&messages).await
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        seen: Mutex<Vec<Message>>,
        fail: bool,
    }

    #[async_trait]
    impl LLMClient for RecordingClient {
        async fn generate_with_history(&self, messages: &[Message]) -> Result<String> {
            *self.seen.lock() = messages.to_vec();
            if self.fail {
                return Err(AppError::Upstream("boom".to_string()));
            }
            Ok("reply".to_string())
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_reply_prepends_system_prompt() {
        let client = Arc::new(RecordingClient::default());
        let gateway = CompletionGateway::new(client.clone(), "Be kind.");

        let reply = gateway.reply(&[Message::user("hello")], None).await.unwrap();
        assert_eq!(reply, "reply");

        let seen = client.seen.lock().clone();
        assert_eq!(seen, vec![Message::system("Be kind."), Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_reply_surfaces_upstream_error() {
        let client = Arc::new(RecordingClient {
            fail: true,
            ..Default::default()
        });
        let gateway = CompletionGateway::new(client, "Be kind.");

        let err = gateway.reply(&[], None).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
