//! DeepSeek HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{Value, json};
use tracing::debug;

use super::streaming::ReasoningFragmentParser;
use super::{PROVIDER, ReasoningFragment};
use crate::config::ChainConfig;
use crate::error::{ChainError, Result};
use crate::providers::sse::SseStream;
use crate::providers::{FragmentStream, ReasoningTransport};
use crate::types::ChatMessage;

/// Streaming client for the DeepSeek chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl DeepSeekClient {
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
            base_url: config.deepseek_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(auth) = format!("Bearer {}", self.api_key).parse() {
            headers.insert("Authorization", auth);
        }
        headers.insert("Content-Type", "application/json".parse().unwrap());
        headers
    }

    async fn open_stream(&self, body: Value) -> Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.base_url);
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
impl ReasoningTransport for DeepSeekClient {
    async fn stream_reasoning(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<FragmentStream<ReasoningFragment>> {
        let body = json!({
            "model": model,
            "messages": messages,
            "stream": true,
        });

        debug!(model, turns = messages.len(), "opening reasoning stream");
        let response = self.open_stream(body).await?;

        Ok(Box::pin(SseStream::new(
            response.bytes_stream(),
            ReasoningFragmentParser,
        )))
    }
}
