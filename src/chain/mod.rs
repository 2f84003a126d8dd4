//! Model chain orchestration.
//!
//! [`ModelChain`] drives the two-stage pipeline: the reasoning stage streams
//! a chain-of-thought for the query, then the response backend streams the
//! final answer from the query plus that reasoning. The two provider
//! histories live in their owning stages and never mix schemas.

mod accumulate;
mod reasoning;

pub use accumulate::accumulate;
pub use reasoning::ReasoningStage;

use tracing::info;

use crate::config::ChainConfig;
use crate::credentials;
use crate::error::Result;
use crate::providers::ResponseBackend;
use crate::providers::anthropic::{AnthropicClient, ClaudeResponder};
use crate::providers::deepseek::DeepSeekClient;
use crate::providers::openrouter::{OpenRouterClient, OpenRouterResponder};
use crate::types::ChatMessage;

/// Result of one full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub reasoning: String,
    pub response: String,
}

/// Two-stage reasoning/response orchestrator, generic over the response
/// backend so each variant's history keeps its native schema.
///
/// Execution is strictly sequential and `run` takes `&mut self`; nothing
/// here is internally synchronized, so concurrent callers must serialize
/// access externally (one chain per session, or a mutex around the chain).
pub struct ModelChain<B: ResponseBackend> {
    reasoning: ReasoningStage,
    response: B,
    current_model: String,
    /// Display-only: tells presentation code whether to show the reasoning
    /// text. Never changes what runs or what is stored.
    pub show_reasoning: bool,
}

impl<B: ResponseBackend> std::fmt::Debug for ModelChain<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelChain")
            .field("current_model", &self.current_model)
            .field("show_reasoning", &self.show_reasoning)
            .finish_non_exhaustive()
    }
}

/// Chain responding via OpenRouter.
pub type OpenRouterChain = ModelChain<OpenRouterResponder>;

/// Chain responding via Anthropic Claude.
pub type ClaudeChain = ModelChain<ClaudeResponder>;

impl<B: ResponseBackend> ModelChain<B> {
    /// Assemble a chain from already-built stages. The public constructors
    /// wrap this; tests use it directly with fixture transports.
    pub fn from_parts(reasoning: ReasoningStage, response: B, model: impl Into<String>) -> Self {
        Self {
            reasoning,
            response,
            current_model: model.into(),
            show_reasoning: true,
        }
    }

    /// Run the full pipeline for one query: reasoning first, then the
    /// response call with `(query, reasoning)`. No overlap between stages.
    ///
    /// Reasoning failures always propagate. Response failures follow the
    /// backend's policy: OpenRouter propagates, Claude returns its fixed
    /// error text in place of the response.
    pub async fn run(&mut self, query: &str) -> Result<ChainOutcome> {
        let reasoning = self.reasoning.reason(query).await?;
        let response = self
            .response
            .respond(&self.current_model, query, &reasoning)
            .await?;
        Ok(ChainOutcome {
            reasoning,
            response,
        })
    }

    /// Select the response-stage model. Any string is accepted; an invalid
    /// identifier only surfaces when the provider call is made.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.current_model = model.into();
    }

    /// The selected model identifier, unchanged — there is no mapping table.
    pub fn get_model_display_name(&self) -> &str {
        &self.current_model
    }

    pub fn reasoning_history(&self) -> &[ChatMessage] {
        self.reasoning.history()
    }

    pub fn response_history(&self) -> &[B::Turn] {
        self.response.history()
    }

    pub fn clear_reasoning_history(&mut self) {
        self.reasoning.clear_history();
    }

    pub fn clear_response_history(&mut self) {
        self.response.clear_history();
    }
}

impl OpenRouterChain {
    /// Build an OpenRouter-backed chain, validating `DEEPSEEK_API_KEY` and
    /// `OPENROUTER_API_KEY` in that order. Fails fast on the first invalid
    /// key with an error naming it; no partially-built chain escapes.
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        let deepseek_key =
            credentials::validate("DEEPSEEK_API_KEY", config.deepseek_api_key.as_deref())?;
        let openrouter_key =
            credentials::validate("OPENROUTER_API_KEY", config.openrouter_api_key.as_deref())?;

        let reasoning = ReasoningStage::new(
            Box::new(DeepSeekClient::new(config, deepseek_key)?),
            config.reasoning_model.clone(),
        );
        let response = OpenRouterResponder::new(Box::new(OpenRouterClient::new(
            config,
            openrouter_key,
        )?));
        let model = config
            .default_model
            .clone()
            .unwrap_or_else(|| response.default_model().to_string());

        info!(model = %model, "openrouter chain ready");
        Ok(Self::from_parts(reasoning, response, model))
    }
}

impl ClaudeChain {
    /// Build a Claude-backed chain, validating `DEEPSEEK_API_KEY` and
    /// `ANTHROPIC_API_KEY` in that order.
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        let deepseek_key =
            credentials::validate("DEEPSEEK_API_KEY", config.deepseek_api_key.as_deref())?;
        let anthropic_key =
            credentials::validate("ANTHROPIC_API_KEY", config.anthropic_api_key.as_deref())?;

        let reasoning = ReasoningStage::new(
            Box::new(DeepSeekClient::new(config, deepseek_key)?),
            config.reasoning_model.clone(),
        );
        let response =
            ClaudeResponder::new(Box::new(AnthropicClient::new(config, anthropic_key)?));
        let model = config
            .default_model
            .clone()
            .unwrap_or_else(|| response.default_model().to_string());

        info!(model = %model, "claude chain ready");
        Ok(Self::from_parts(reasoning, response, model))
    }
}
