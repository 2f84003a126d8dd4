//! Anthropic Claude response backend.
//!
//! Typed content-block wire schema and event-typed SSE streaming. This
//! variant contains provider failures: callers get a fixed error text
//! instead of an error, with the partial history state left as-is.

mod client;
mod provider;
mod streaming;

pub use client::AnthropicClient;
pub use provider::{CLAUDE_ERROR_RESPONSE, ClaudeResponder, DEFAULT_CLAUDE_MODEL};
pub use streaming::TextFragment;

pub(crate) const PROVIDER: &str = "anthropic";
