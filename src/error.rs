//! Unified error type for the chain and both provider backends.
//!
//! A single enum covers every failure the pipeline can produce: credential
//! validation at construction and the provider-call taxonomy during a run.
//! Provider variants carry a `&'static str` tag so errors stay cheap to
//! construct and report which backend misbehaved.

/// Error type shared by the orchestrator, both stages, and the HTTP clients.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// A required credential was absent, blank, or a known placeholder.
    /// Raised only at chain construction; `name` is the environment key.
    #[error("Invalid or missing {name}")]
    Credential { name: &'static str },

    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Rate limit exceeded for {provider}")]
    RateLimit {
        provider: &'static str,
        retry_after: Option<u64>,
    },

    #[error("API error for {provider} (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },
}

impl ChainError {
    pub fn credential(name: &'static str) -> Self {
        Self::Credential { name }
    }

    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    pub fn rate_limit(provider: &'static str, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider,
            retry_after,
        }
    }

    pub fn api(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn parse(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            message: message.into(),
        }
    }

    /// Map a non-2xx HTTP status from a provider endpoint to an error variant.
    pub fn from_status(provider: &'static str, status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::authentication(provider, "Invalid or missing API key"),
            429 => Self::rate_limit(provider, None),
            _ => Self::api(provider, status, body),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChainError>;
