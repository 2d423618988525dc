//! Normalized chat response
//!
//! OpenAI-shaped providers already answer in the normalized shape, so their
//! reply is kept as the exact JSON they sent. Only the presence of a
//! `choices` array is checked; everything else (`usage: null`, array
//! `content`, missing `total_tokens`, vendor fields) goes back to the caller
//! untouched. Translating adapters build the same shape with
//! [`ChatResponse::assistant`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use super::types::Role;

/// Token usage statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[schema(example = 10)]
    pub prompt_tokens: u64,
    /// Number of tokens in the completion
    #[schema(example = 5)]
    pub completion_tokens: u64,
    /// Total tokens used
    #[schema(example = 15)]
    pub total_tokens: u64,
}

impl Usage {
    /// Build usage from prompt and completion counts, summing the total
    pub fn from_counts(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Message in a completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChoiceMessage {
    /// Always `assistant` for completions
    pub role: Role,
    /// Generated text; some providers send an array of content parts instead
    #[schema(example = "Hello! How can I help you today?")]
    pub content: Option<String>,
}

/// A completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Choice {
    /// The generated message
    pub message: ChoiceMessage,
}

/// Response body of `POST /api/llm` (documentation schema)
///
/// Replies from OpenAI-compatible providers may carry any further fields the
/// provider sends.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponseBody {
    /// Completion choices; translating adapters populate only the first
    pub choices: Vec<Choice>,
    /// Token usage statistics, when the provider reports them
    pub usage: Option<Usage>,
}

/// Chat completion response returned for every provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatResponse(Value);

impl ChatResponse {
    /// Build a single-choice assistant response
    pub fn assistant(content: impl Into<String>, usage: Option<Usage>) -> Self {
        let mut body = Map::new();
        body.insert(
            "choices".to_string(),
            json!([{"message": {"role": Role::Assistant, "content": content.into()}}]),
        );
        if let Some(usage) = usage {
            body.insert(
                "usage".to_string(),
                json!({
                    "prompt_tokens": usage.prompt_tokens,
                    "completion_tokens": usage.completion_tokens,
                    "total_tokens": usage.total_tokens
                }),
            );
        }
        Self(Value::Object(body))
    }

    /// Accept an OpenAI-shaped reply as is
    ///
    /// Fails with a reason when the body has no `choices` array.
    pub fn from_upstream(body: Value) -> Result<Self, String> {
        match body.get("choices") {
            Some(Value::Array(_)) => Ok(Self(body)),
            Some(_) => Err("`choices` is not an array".to_string()),
            None => Err("missing `choices`".to_string()),
        }
    }

    /// Text of the first choice, if it is a plain string
    pub fn first_content(&self) -> Option<&str> {
        self.0
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
    }

    fn usage_count(&self, field: &str) -> Option<u64> {
        self.0.get("usage")?.get(field)?.as_u64()
    }

    /// Prompt tokens reported by the provider
    pub fn prompt_tokens(&self) -> Option<u64> {
        self.usage_count("prompt_tokens")
    }

    /// Completion tokens reported by the provider
    pub fn completion_tokens(&self) -> Option<u64> {
        self.usage_count("completion_tokens")
    }

    /// Total tokens, derived from the parts when the provider omits it
    pub fn total_tokens(&self) -> Option<u64> {
        self.usage_count("total_tokens").or_else(|| {
            match (self.prompt_tokens(), self.completion_tokens()) {
                (None, None) => None,
                (prompt, completion) => {
                    Some(prompt.unwrap_or(0).saturating_add(completion.unwrap_or(0)))
                }
            }
        })
    }

    /// The JSON body sent to the caller
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
