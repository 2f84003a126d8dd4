//! OpenRouter HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{Value, json};
use tracing::debug;

use super::streaming::ChatFragmentParser;
use super::{ChatFragment, PROVIDER};
use crate::config::ChainConfig;
use crate::error::{ChainError, Result};
use crate::providers::sse::SseStream;
use crate::providers::{ChatTransport, FragmentStream};
use crate::types::ChatMessage;

/// Attribution headers OpenRouter uses to rank client apps.
const SITE_URL: &str = "https://github.com/majiayu000/rat-chain";
const SITE_NAME: &str = "rat-chain";

/// Streaming client for the OpenRouter chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterClient {
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
            base_url: config.openrouter_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(auth) = format!("Bearer {}", self.api_key).parse() {
            headers.insert("Authorization", auth);
        }
        headers.insert("Content-Type", "application/json".parse().unwrap());
        headers.insert("HTTP-Referer", SITE_URL.parse().unwrap());
        headers.insert("X-Title", SITE_NAME.parse().unwrap());
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
impl ChatTransport for OpenRouterClient {
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<FragmentStream<ChatFragment>> {
        let body = json!({
            "model": model,
            "messages": messages,
            "stream": true,
        });

        debug!(model, turns = messages.len(), "opening response stream");
        let response = self.open_stream(body).await?;

        Ok(Box::pin(SseStream::new(
            response.bytes_stream(),
            ChatFragmentParser,
        )))
    }
}
