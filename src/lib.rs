//! # rat-chain
//!
//! A two-stage text-generation pipeline: a reasoning model streams a
//! chain-of-thought for a query, and a response model consumes the query
//! plus that reasoning to produce the final answer.
//!
//! ## Features
//!
//! - **Two interchangeable response backends**: OpenRouter (OpenAI-style
//!   wire schema) and Anthropic Claude (typed content-block schema)
//! - **Streaming throughout**: both stages consume SSE token streams and
//!   accumulate them into complete text
//! - **Schema-correct histories**: each backend owns its conversation
//!   history in its native message shape; histories are never cross-populated
//! - **Fail-fast construction**: provider credentials are validated before a
//!   chain exists, with errors naming the offending key
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rat_chain::{ChainConfig, OpenRouterChain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChainConfig::from_env();
//!     let mut chain = OpenRouterChain::from_config(&config)?;
//!
//!     let outcome = chain.run("What is 2+2?").await?;
//!     println!("reasoning: {}", outcome.reasoning);
//!     println!("response:  {}", outcome.response);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod chain;
pub mod config;
pub mod credentials;
pub mod error;
pub mod providers;
pub mod types;

// Re-export the main surface
pub use chain::{ChainOutcome, ClaudeChain, ModelChain, OpenRouterChain, ReasoningStage};
pub use config::ChainConfig;
pub use error::{ChainError, Result};
pub use providers::ResponseBackend;
pub use providers::anthropic::{CLAUDE_ERROR_RESPONSE, ClaudeResponder, DEFAULT_CLAUDE_MODEL};
pub use providers::openrouter::{DEFAULT_OPENROUTER_MODEL, OpenRouterResponder};
pub use types::{ChatMessage, ContentBlock, MessageParam, Role};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "rat-chain");
    }
}
