//! Anthropic adapter
//!
//! Translates between the normalized chat shape and Anthropic's Messages API:
//! - the first system message moves to the top-level `system` field
//! - only user and assistant turns stay in `messages`
//! - the reply's first content block becomes the assistant message, and
//!   `input_tokens`/`output_tokens` become prompt/completion usage
//!
//! Only the first content block is read; any further blocks in a reply are
//! dropped.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::headers::anthropic_headers;
use super::logging::RequestContext;
use super::provider::{require_secret, ChatAdapter};
use super::upstream::{extract_error_message, post_json};
use crate::config::{Config, SecretSource, ANTHROPIC_API_KEY_VAR};
use crate::error::{RelayError, RelayResult};
use crate::llm::{ChatMessage, ChatRequest, ChatResponse, ProviderId, Role, Usage};

const MESSAGES_PATH: &str = "/messages";

/// Anthropic Messages API request body
#[derive(Debug, Serialize, PartialEq)]
struct AnthropicRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    system: &'a str,
    temperature: f64,
    max_tokens: u32,
}

/// Anthropic Messages API response body (fields we read)
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

fn translate_request(request: &ChatRequest) -> AnthropicRequest<'_> {
    let system = request
        .messages
        .iter()
        .find(|message| message.role == Role::System)
        .map(|message| message.content.as_str())
        .unwrap_or_default();

    let messages = request
        .messages
        .iter()
        .filter(|message| matches!(message.role, Role::User | Role::Assistant))
        .collect();

    AnthropicRequest {
        model: &request.model,
        messages,
        system,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

fn translate_response(response: AnthropicResponse) -> RelayResult<ChatResponse> {
    let text = response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| RelayError::InvalidResponse {
            provider: ProviderId::Anthropic,
            reason: "first content block has no text".to_string(),
        })?;

    let usage = response
        .usage
        .map(|usage| Usage::from_counts(usage.input_tokens, usage.output_tokens));

    Ok(ChatResponse::assistant(text, usage))
}

/// Anthropic Messages API adapter
pub struct AnthropicAdapter {
    client: reqwest::Client,
    base_url: String,
    secrets: Arc<dyn SecretSource>,
}

impl AnthropicAdapter {
    /// Create a new Anthropic adapter
    pub fn new(client: reqwest::Client, config: &Config, secrets: Arc<dyn SecretSource>) -> Self {
        Self {
            client,
            base_url: config.anthropic_api_url.clone(),
            secrets,
        }
    }
}

#[async_trait]
impl ChatAdapter for AnthropicAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn is_configured(&self) -> bool {
        self.secrets.get(ANTHROPIC_API_KEY_VAR).is_some()
    }

    async fn send(&self, request: &ChatRequest) -> RelayResult<ChatResponse> {
        let api_key = require_secret(
            self.secrets.as_ref(),
            ANTHROPIC_API_KEY_VAR,
            ProviderId::Anthropic,
        )?;
        let headers = anthropic_headers(&api_key)
            .map_err(|_| RelayError::InvalidCredential(ProviderId::Anthropic))?;

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), MESSAGES_PATH);
        let ctx = RequestContext::new(ProviderId::Anthropic, MESSAGES_PATH).with_model(&request.model);
        let body = translate_request(request);

        ctx.log_upstream_request(&url, body.messages.len());
        let reply = post_json(&self.client, &ctx, &url, headers, &body).await?;

        if !reply.status.is_success() {
            let message = extract_error_message(&reply.body, false)
                .unwrap_or_else(|| "error in Anthropic API".to_string());
            let err = RelayError::upstream(ProviderId::Anthropic, reply.status.as_u16(), message);
            ctx.log_error(&err.to_string());
            return Err(err);
        }

        let parsed: AnthropicResponse =
            serde_json::from_slice(&reply.body).map_err(|e| RelayError::InvalidResponse {
                provider: ProviderId::Anthropic,
                reason: e.to_string(),
            })?;
        let response = translate_response(parsed)?;

        ctx.log_request_complete(response.total_tokens());
        Ok(response)
    }
}
