//! Claude response backend implementation.

use async_trait::async_trait;
use tracing::warn;

use super::{PROVIDER, TextFragment};
use crate::chain::accumulate;
use crate::error::Result;
use crate::providers::{MessageTransport, ResponseBackend, compose_prompt};
use crate::types::MessageParam;

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Fixed text returned in place of a response when the provider call fails.
pub const CLAUDE_ERROR_RESPONSE: &str = "Error occurred while getting response";

/// Response stage backed by Anthropic Claude.
///
/// History entries use the native typed content-block schema. Unlike the
/// OpenRouter variant, any failure during the provider call is contained:
/// `respond` returns [`CLAUDE_ERROR_RESPONSE`] instead of an error, and the
/// history keeps the already-appended user turn with no assistant turn.
pub struct ClaudeResponder {
    transport: Box<dyn MessageTransport>,
    messages: Vec<MessageParam>,
}

impl ClaudeResponder {
    pub fn new(transport: Box<dyn MessageTransport>) -> Self {
        Self {
            transport,
            messages: Vec::new(),
        }
    }

    async fn call(&self, model: &str) -> Result<String> {
        let stream = self.transport.stream_messages(model, &self.messages).await?;
        accumulate(stream, |f: &TextFragment| f.text.as_deref()).await
    }
}

#[async_trait]
impl ResponseBackend for ClaudeResponder {
    type Turn = MessageParam;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_CLAUDE_MODEL
    }

    async fn respond(&mut self, model: &str, query: &str, reasoning: &str) -> Result<String> {
        self.messages
            .push(MessageParam::user(compose_prompt(query, reasoning)));

        let text = match self.call(model).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "claude response failed");
                return Ok(CLAUDE_ERROR_RESPONSE.to_string());
            }
        };

        self.messages.push(MessageParam::assistant(text.clone()));
        Ok(text)
    }

    fn history(&self) -> &[MessageParam] {
        &self.messages
    }

    fn clear_history(&mut self) {
        self.messages.clear();
    }
}
