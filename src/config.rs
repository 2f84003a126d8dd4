//! Chain configuration.
//!
//! Raw credential values land here unvalidated; validation happens at chain
//! construction so a misconfigured key fails fast with the key's name. Base
//! URLs are overridable, which is also what the test suite uses to point the
//! clients at a local mock server.

/// Configuration for building a [`crate::ModelChain`].
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Raw `DEEPSEEK_API_KEY` value, validated at construction.
    pub deepseek_api_key: Option<String>,
    /// Raw `OPENROUTER_API_KEY` value, validated when building the
    /// OpenRouter variant.
    pub openrouter_api_key: Option<String>,
    /// Raw `ANTHROPIC_API_KEY` value, validated when building the Claude
    /// variant.
    pub anthropic_api_key: Option<String>,

    pub deepseek_base_url: String,
    pub openrouter_base_url: String,
    pub anthropic_base_url: String,

    /// Model used by the reasoning stage.
    pub reasoning_model: String,
    /// Initial response-stage model. `None` falls back to the chosen
    /// variant's default at the construction call site.
    pub default_model: Option<String>,

    /// Whole-request timeout in seconds.
    pub request_timeout: u64,
    /// Connect timeout in seconds.
    pub connect_timeout: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            deepseek_api_key: None,
            openrouter_api_key: None,
            anthropic_api_key: None,
            deepseek_base_url: "https://api.deepseek.com".to_string(),
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            reasoning_model: "deepseek-reasoner".to_string(),
            default_model: None,
            request_timeout: 300,
            connect_timeout: 10,
        }
    }
}

impl ChainConfig {
    /// Read credentials and overrides from the process environment. Loading
    /// a `.env` file beforehand is the caller's job.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            deepseek_api_key: std::env::var("DEEPSEEK_API_KEY").ok(),
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY").ok(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            deepseek_base_url: std::env::var("DEEPSEEK_BASE_URL")
                .unwrap_or(defaults.deepseek_base_url),
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or(defaults.openrouter_base_url),
            anthropic_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or(defaults.anthropic_base_url),
            ..defaults
        }
    }

    pub fn with_deepseek_key(mut self, key: impl Into<String>) -> Self {
        self.deepseek_api_key = Some(key.into());
        self
    }

    pub fn with_openrouter_key(mut self, key: impl Into<String>) -> Self {
        self.openrouter_api_key = Some(key.into());
        self
    }

    pub fn with_anthropic_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }
}
