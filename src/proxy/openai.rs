//! OpenAI adapter
//!
//! Bearer-authenticated calls to the OpenAI chat completions API.

use std::sync::Arc;

use async_trait::async_trait;

use super::headers::bearer_headers;
use super::openai_compat::{ErrorFormat, OpenAICompatibleClient};
use super::provider::{require_secret, ChatAdapter};
use crate::config::{Config, SecretSource, OPENAI_API_KEY_VAR};
use crate::error::{RelayError, RelayResult};
use crate::llm::{ChatRequest, ChatResponse, ProviderId};

/// OpenAI chat completions adapter
pub struct OpenAIAdapter {
    http: OpenAICompatibleClient,
    base_url: String,
    secrets: Arc<dyn SecretSource>,
}

impl OpenAIAdapter {
    /// Create a new OpenAI adapter
    pub fn new(client: reqwest::Client, config: &Config, secrets: Arc<dyn SecretSource>) -> Self {
        Self {
            http: OpenAICompatibleClient::new(client, ProviderId::OpenAI, ErrorFormat::Hosted),
            base_url: config.openai_api_url.clone(),
            secrets,
        }
    }
}

#[async_trait]
impl ChatAdapter for OpenAIAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    fn is_configured(&self) -> bool {
        self.secrets.get(OPENAI_API_KEY_VAR).is_some()
    }

    async fn send(&self, request: &ChatRequest) -> RelayResult<ChatResponse> {
        let api_key = require_secret(self.secrets.as_ref(), OPENAI_API_KEY_VAR, ProviderId::OpenAI)?;
        let headers =
            bearer_headers(&api_key).map_err(|_| RelayError::InvalidCredential(ProviderId::OpenAI))?;

        self.http
            .chat_completions(&self.base_url, headers, request)
            .await
    }
}
