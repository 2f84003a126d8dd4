//! Anthropic HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{Value, json};
use tracing::debug;

use super::streaming::TextFragmentParser;
use super::{PROVIDER, TextFragment};
use crate::config::ChainConfig;
use crate::error::{ChainError, Result};
use crate::providers::sse::SseStream;
use crate::providers::{FragmentStream, MessageTransport};
use crate::types::MessageParam;

const API_VERSION: &str = "2023-06-01";

/// The messages endpoint requires an explicit output cap on every request.
const MAX_TOKENS: u32 = 8000;

/// Streaming client for the Anthropic messages endpoint.
///
/// The returned fragment stream owns the response body; dropping it after
/// iteration — complete or not — closes the connection, so the stream is
/// always released regardless of how consumption ends.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(config: &ChainConfig, api_key: String) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| {
                ChainError::network(PROVIDER, format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.anthropic_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(key) = self.api_key.parse() {
            headers.insert("x-api-key", key);
        }
        headers.insert("anthropic-version", API_VERSION.parse().unwrap());
        headers.insert("Content-Type", "application/json".parse().unwrap());
        headers
    }

    async fn open_stream(&self, body: Value) -> Result<reqwest::Response> {
        let url = format!("{}/v1/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::network(PROVIDER, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(ChainError::from_status(PROVIDER, status, &body));
        }

        Ok(response)
    }
}

#[async_trait]
impl MessageTransport for AnthropicClient {
    async fn stream_messages(
        &self,
        model: &str,
        messages: &[MessageParam],
    ) -> Result<FragmentStream<TextFragment>> {
        let body = json!({
            "model": model,
            "max_tokens": MAX_TOKENS,
            "messages": messages,
            "stream": true,
        });

        debug!(model, turns = messages.len(), "opening messages stream");
        let response = self.open_stream(body).await?;

        Ok(Box::pin(SseStream::new(
            response.bytes_stream(),
            TextFragmentParser,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AnthropicClient::new(&ChainConfig::default(), "sk-ant".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn test_header_building() {
        let client = AnthropicClient::new(&ChainConfig::default(), "sk-ant".to_string()).unwrap();
        let headers = client.build_headers();
        // Anthropic uses x-api-key instead of Authorization
        assert_eq!(
            headers.get("x-api-key").unwrap().to_str().unwrap(),
            "sk-ant"
        );
        assert_eq!(
            headers.get("anthropic-version").unwrap().to_str().unwrap(),
            API_VERSION
        );
        assert!(headers.contains_key("content-type"));
    }
}
