//! Mistral adapter
//!
//! Mistral's chat completions API is OpenAI-compatible and authenticated with
//! a bearer key.

use std::sync::Arc;

use async_trait::async_trait;

use super::headers::bearer_headers;
use super::openai_compat::{ErrorFormat, OpenAICompatibleClient};
use super::provider::{require_secret, ChatAdapter};
use crate::config::{Config, SecretSource, MISTRAL_API_KEY_VAR};
use crate::error::{RelayError, RelayResult};
use crate::llm::{ChatRequest, ChatResponse, ProviderId};

pub struct MistralAdapter {
    http: OpenAICompatibleClient,
    base_url: String,
    secrets: Arc<dyn SecretSource>,
}

impl MistralAdapter {
    pub fn new(client: reqwest::Client, config: &Config, secrets: Arc<dyn SecretSource>) -> Self {
        Self {
            http: OpenAICompatibleClient::new(client, ProviderId::Mistral, ErrorFormat::Hosted),
            base_url: config.mistral_api_url.clone(),
            secrets,
        }
    }
}

#[async_trait]
impl ChatAdapter for MistralAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Mistral
    }

    fn is_configured(&self) -> bool {
        self.secrets.get(MISTRAL_API_KEY_VAR).is_some()
    }

    async fn send(&self, request: &ChatRequest) -> RelayResult<ChatResponse> {
        let api_key =
            require_secret(self.secrets.as_ref(), MISTRAL_API_KEY_VAR, ProviderId::Mistral)?;
        let headers = bearer_headers(&api_key)
            .map_err(|_| RelayError::InvalidCredential(ProviderId::Mistral))?;

        self.http
            .chat_completions(&self.base_url, headers, request)
            .await
    }
}
