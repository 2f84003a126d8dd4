//! Provider transports and the response-backend seam.
//!
//! Each provider module packages an HTTP client and its streaming fragment
//! parser. The transport traits are the collaborator boundary the pipeline
//! consumes: real implementations open SSE streams over HTTP, tests swap in
//! `futures::stream::iter` fixtures.

pub mod anthropic;
pub mod deepseek;
pub mod openrouter;
pub(crate) mod sse;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;

use crate::error::Result;
use crate::types::{ChatMessage, MessageParam};

use anthropic::TextFragment;
use deepseek::ReasoningFragment;
use openrouter::ChatFragment;

/// A streamed sequence of provider fragments.
pub type FragmentStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Streaming client for the reasoning provider. Fragments may carry a
/// thought and/or a final-answer field; the reasoning stage decides which
/// one to keep.
#[async_trait]
pub trait ReasoningTransport: Send + Sync {
    async fn stream_reasoning(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<FragmentStream<ReasoningFragment>>;
}

/// Streaming client for an OpenAI-style chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<FragmentStream<ChatFragment>>;
}

/// Streaming client for an Anthropic-style messages endpoint.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn stream_messages(
        &self,
        model: &str,
        messages: &[MessageParam],
    ) -> Result<FragmentStream<TextFragment>>;
}

/// A response-stage backend: one `respond` call plus an owned conversation
/// history in the backend's native message schema.
///
/// The two implementations differ in content shape (plain string vs. typed
/// content blocks) and in failure policy — [`openrouter::OpenRouterResponder`]
/// propagates provider errors, [`anthropic::ClaudeResponder`] contains them
/// into a fixed error text. Both quirks are load-bearing, documented
/// behavior.
#[async_trait]
pub trait ResponseBackend: Send {
    /// Native history entry type for this backend.
    type Turn: Clone + Serialize;

    fn provider(&self) -> &'static str;

    /// Model used when the chain configuration names none.
    fn default_model(&self) -> &'static str;

    /// Build the composite prompt from `query` and `reasoning`, append it as
    /// a user turn, stream the provider with the entire history, append the
    /// accumulated assistant turn, and return the accumulated text.
    async fn respond(&mut self, model: &str, query: &str, reasoning: &str) -> Result<String>;

    fn history(&self) -> &[Self::Turn];

    fn clear_history(&mut self);
}

/// Composite prompt envelope shared by both response backends.
pub(crate) fn compose_prompt(query: &str, reasoning: &str) -> String {
    format!(
        "<question>{}</question>\n\n<thinking>{}</thinking>\n\n",
        query, reasoning
    )
}
