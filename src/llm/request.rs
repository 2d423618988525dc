//! Normalized chat request and inbound validation
//!
//! Validation runs against the raw JSON body so that the error reported for a
//! malformed request does not depend on which fields serde happens to reach
//! first: the provider is checked before model and messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::types::{ChatMessage, ProviderId};
use crate::error::{RelayError, RelayResult};

/// Sampling temperature used when the request does not set one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Completion token cap used when the request does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Normalized chat request handed to provider adapters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub provider: ProviderId,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Request body accepted by `POST /api/llm` (documentation schema)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequestBody {
    /// Upstream provider
    pub provider: ProviderId,
    /// Provider-specific model identifier
    #[schema(example = "gpt-3.5-turbo")]
    pub model: String,
    /// Conversation, oldest first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (default 0.7)
    #[schema(example = 0.7)]
    pub temperature: Option<f64>,
    /// Maximum completion tokens (default 1000); a whole number, which may be
    /// written as `1000.0`
    #[schema(example = 1000)]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Build a request with default sampling parameters
    pub fn new(provider: ProviderId, model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            provider,
            model: model.into(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Validate a raw JSON body and extract the normalized request
    ///
    /// # Errors
    ///
    /// - [`RelayError::UnsupportedProvider`] when `provider` is absent or not
    ///   one of the supported identifiers, regardless of the other fields
    /// - [`RelayError::MissingFields`] when `model` or `messages` is absent
    /// - [`RelayError::InvalidRequest`] when a present field has the wrong shape
    pub fn from_json(body: &Value) -> RelayResult<Self> {
        let provider = body
            .get("provider")
            .and_then(Value::as_str)
            .and_then(|name| name.parse::<ProviderId>().ok())
            .ok_or(RelayError::UnsupportedProvider)?;

        let model = body
            .get("model")
            .and_then(Value::as_str)
            .filter(|model| !model.is_empty());
        let messages = body.get("messages").filter(|messages| !messages.is_null());

        let (Some(model), Some(messages)) = (model, messages) else {
            return Err(RelayError::MissingFields);
        };

        let messages: Vec<ChatMessage> = serde_json::from_value(messages.clone())
            .map_err(|e| RelayError::InvalidRequest(format!("invalid messages: {}", e)))?;

        let temperature = match body.get("temperature") {
            None | Some(Value::Null) => DEFAULT_TEMPERATURE,
            Some(value) => value.as_f64().ok_or_else(|| {
                RelayError::InvalidRequest("temperature must be a number".to_string())
            })?,
        };

        let max_tokens = match body.get("max_tokens") {
            None | Some(Value::Null) => DEFAULT_MAX_TOKENS,
            Some(value) => token_count(value).ok_or_else(|| {
                RelayError::InvalidRequest("max_tokens must be a non-negative integer".to_string())
            })?,
        };

        Ok(Self {
            provider,
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
        })
    }
}

/// Whole, non-negative number that fits a `u32`; `1000.0` counts as `1000`
fn token_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n))
        .map(|n| n as u32)
}
