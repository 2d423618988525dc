//! Client for OpenAI-compatible chat completion endpoints
//!
//! OpenAI, Mistral and LM Studio all accept `{model, messages, temperature,
//! max_tokens}` at `<base>/chat/completions` and answer in the normalized
//! shape already, so the reply body is passed through unmodified.

use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use super::logging::RequestContext;
use super::upstream::{extract_error_message, post_json};
use crate::error::{RelayError, RelayResult};
use crate::llm::{ChatMessage, ChatRequest, ChatResponse, ProviderId};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// How a provider reports failures in its error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    /// `{"error": {"message": "..."}}`
    Hosted,
    /// Hosted layout or `{"error": "..."}`; the message names the local server
    LocalServer,
}

/// Wire body for OpenAI-compatible chat completions
#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

/// OpenAI-compatible chat completions client for one provider
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: reqwest::Client,
    provider: ProviderId,
    error_format: ErrorFormat,
}

impl OpenAICompatibleClient {
    /// Create a client for a provider
    pub fn new(client: reqwest::Client, provider: ProviderId, error_format: ErrorFormat) -> Self {
        Self {
            client,
            provider,
            error_format,
        }
    }

    /// Send a chat completion to `<base_url>/chat/completions`
    pub async fn chat_completions(
        &self,
        base_url: &str,
        headers: HeaderMap,
        request: &ChatRequest,
    ) -> RelayResult<ChatResponse> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH);
        let ctx = RequestContext::new(self.provider, CHAT_COMPLETIONS_PATH).with_model(&request.model);

        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        ctx.log_upstream_request(&url, request.messages.len());
        let reply = post_json(&self.client, &ctx, &url, headers, &body).await?;

        if !reply.status.is_success() {
            let err = self.upstream_error(reply.status.as_u16(), &reply.body);
            ctx.log_error(&err.to_string());
            return Err(err);
        }

        let response = serde_json::from_slice::<Value>(&reply.body)
            .map_err(|e| e.to_string())
            .and_then(ChatResponse::from_upstream)
            .map_err(|reason| RelayError::InvalidResponse {
                provider: self.provider,
                reason,
            })?;

        ctx.log_request_complete(response.total_tokens());
        Ok(response)
    }

    /// Map a non-success reply to an upstream error
    fn upstream_error(&self, status: u16, body: &[u8]) -> RelayError {
        let name = self.provider.display_name();
        let accept_plain = self.error_format == ErrorFormat::LocalServer;

        match (self.error_format, extract_error_message(body, accept_plain)) {
            (_, None) => RelayError::upstream(self.provider, status, format!("error in {} API", name)),
            (ErrorFormat::Hosted, Some(message)) => {
                RelayError::upstream(self.provider, status, message)
            }
            (ErrorFormat::LocalServer, Some(message)) => RelayError::Upstream {
                provider: self.provider,
                status,
                message: format!("error connecting to {}: {}", name, message),
                details: message,
            },
        }
    }
}
