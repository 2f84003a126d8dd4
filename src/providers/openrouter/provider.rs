//! OpenRouter response backend implementation.

use async_trait::async_trait;

use super::{ChatFragment, PROVIDER};
use crate::chain::accumulate;
use crate::error::Result;
use crate::providers::{ChatTransport, ResponseBackend, compose_prompt};
use crate::types::ChatMessage;

pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";

/// Response stage backed by OpenRouter.
///
/// History entries are OpenAI-style plain-string messages. Provider errors
/// are NOT contained here: a failed call leaves the already-appended user
/// turn in history and propagates the error to the caller.
pub struct OpenRouterResponder {
    transport: Box<dyn ChatTransport>,
    messages: Vec<ChatMessage>,
}

impl OpenRouterResponder {
    pub fn new(transport: Box<dyn ChatTransport>) -> Self {
        Self {
            transport,
            messages: Vec::new(),
        }
    }
}

#[async_trait]
impl ResponseBackend for OpenRouterResponder {
    type Turn = ChatMessage;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_OPENROUTER_MODEL
    }

    async fn respond(&mut self, model: &str, query: &str, reasoning: &str) -> Result<String> {
        self.messages
            .push(ChatMessage::user(compose_prompt(query, reasoning)));

        let stream = self.transport.stream_chat(model, &self.messages).await?;
        let text = accumulate(stream, |f: &ChatFragment| f.content.as_deref()).await?;

        self.messages.push(ChatMessage::assistant(text.clone()));
        Ok(text)
    }

    fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn clear_history(&mut self) {
        self.messages.clear();
    }
}
