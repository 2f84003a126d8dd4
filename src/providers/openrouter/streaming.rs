//! OpenRouter streaming fragments.

use serde_json::Value;

use super::PROVIDER;
use crate::error::{ChainError, Result};
use crate::providers::sse::FragmentParser;

/// One streamed delta from an OpenAI-compatible chat endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatFragment {
    pub content: Option<String>,
}

pub(crate) struct ChatFragmentParser;

impl FragmentParser for ChatFragmentParser {
    type Fragment = ChatFragment;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn parse_data(&self, data: &str) -> Result<Option<ChatFragment>> {
        let json: Value = serde_json::from_str(data)
            .map_err(|e| ChainError::parse(PROVIDER, format!("Invalid JSON: {}", e)))?;

        let Some(delta) = json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("delta"))
        else {
            return Ok(None);
        };

        Ok(Some(ChatFragment {
            content: delta
                .get("content")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_content_delta() {
        let parser = ChatFragmentParser;
        let data = r#"{"id":"x","choices":[{"index":0,"delta":{"content":"Hello"},"finish_reason":null}]}"#;
        let fragment = parser.parse_data(data).unwrap().unwrap();
        assert_eq!(fragment.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_finish_chunk_has_no_content() {
        let parser = ChatFragmentParser;
        let data = r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#;
        let fragment = parser.parse_data(data).unwrap().unwrap();
        assert_eq!(fragment.content, None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let parser = ChatFragmentParser;
        assert!(parser.parse_data("{invalid json}").is_err());
    }
}
