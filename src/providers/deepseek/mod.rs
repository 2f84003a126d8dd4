//! DeepSeek reasoning provider.
//!
//! OpenAI-compatible chat endpoint whose streamed deltas carry a
//! `reasoning_content` field (the chain-of-thought) alongside the regular
//! `content` field (the model's own final answer).

mod client;
mod streaming;

pub use client::DeepSeekClient;
pub use streaming::ReasoningFragment;

pub(crate) const PROVIDER: &str = "deepseek";
