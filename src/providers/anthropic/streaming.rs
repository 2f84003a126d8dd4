//! Anthropic streaming fragments.
//!
//! Messages-API streams type every SSE payload: text arrives in
//! `content_block_delta` events carrying a `text_delta`, everything else
//! (`message_start`, `ping`, `content_block_stop`, ...) contributes nothing.

use serde_json::Value;

use super::PROVIDER;
use crate::error::{ChainError, Result};
use crate::providers::sse::FragmentParser;

/// One streamed text delta from the messages endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFragment {
    pub text: Option<String>,
}

pub(crate) struct TextFragmentParser;

impl FragmentParser for TextFragmentParser {
    type Fragment = TextFragment;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn parse_data(&self, data: &str) -> Result<Option<TextFragment>> {
        let json: Value = serde_json::from_str(data)
            .map_err(|e| ChainError::parse(PROVIDER, format!("Invalid JSON: {}", e)))?;

        match json.get("type").and_then(|t| t.as_str()) {
            Some("content_block_delta") => {
                let delta = json.get("delta");
                if delta.and_then(|d| d.get("type")).and_then(|t| t.as_str()) != Some("text_delta")
                {
                    return Ok(None);
                }
                Ok(Some(TextFragment {
                    text: delta
                        .and_then(|d| d.get("text"))
                        .and_then(|t| t.as_str())
                        .map(str::to_string),
                }))
            }
            Some("error") => {
                let message = json
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("Unknown error from Anthropic API");
                Err(ChainError::api(PROVIDER, 500, message))
            }
            _ => Ok(None),
        }
    }
}
