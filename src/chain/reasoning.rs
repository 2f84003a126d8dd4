//! Reasoning stage: first hop of the pipeline.

use std::time::Instant;

use tracing::debug;

use super::accumulate;
use crate::error::Result;
use crate::providers::ReasoningTransport;
use crate::providers::deepseek::ReasoningFragment;
use crate::types::ChatMessage;

/// Streams a chain-of-thought for a query from the reasoning provider.
///
/// Owns the reasoning-provider history. Only the user turn is persisted per
/// call — the streamed thought is returned but never stored back as an
/// assistant turn, so the provider sees a history of questions only.
pub struct ReasoningStage {
    transport: Box<dyn ReasoningTransport>,
    model: String,
    messages: Vec<ChatMessage>,
}

impl ReasoningStage {
    pub fn new(transport: Box<dyn ReasoningTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Produce the chain-of-thought for `query`.
    ///
    /// Appends the user turn before the call so the provider sees the full
    /// prior context plus the new query. The stream's parallel final-answer
    /// field is discarded — the response stage re-derives the answer with
    /// the reasoning as added context. Provider errors propagate.
    pub async fn reason(&mut self, query: &str) -> Result<String> {
        self.messages.push(ChatMessage::user(query));

        let started = Instant::now();
        let stream = self
            .transport
            .stream_reasoning(&self.model, &self.messages)
            .await?;
        let thought = accumulate(stream, |f: &ReasoningFragment| f.reasoning.as_deref()).await?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = thought.len(),
            "reasoning complete"
        );
        Ok(thought)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear_history(&mut self) {
        self.messages.clear();
    }
}
