//! DeepSeek streaming fragments.

use serde_json::Value;

use super::PROVIDER;
use crate::error::{ChainError, Result};
use crate::providers::sse::FragmentParser;

/// One streamed delta from the reasoning model.
///
/// The two fields arrive interleaved in the same stream: `reasoning` is the
/// chain-of-thought, `answer` is the model's own final answer. Consumers
/// pick one; the reasoning stage keeps `reasoning` and drops `answer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReasoningFragment {
    pub reasoning: Option<String>,
    pub answer: Option<String>,
}

pub(crate) struct ReasoningFragmentParser;

impl FragmentParser for ReasoningFragmentParser {
    type Fragment = ReasoningFragment;

    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn parse_data(&self, data: &str) -> Result<Option<ReasoningFragment>> {
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

        Ok(Some(ReasoningFragment {
            reasoning: delta
                .get("reasoning_content")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            answer: delta
                .get("content")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }))
    }
}
