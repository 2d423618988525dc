//! LM Studio adapter
//!
//! LM Studio serves an OpenAI-compatible API on the local machine. It needs no
//! credential; the base URL is resolved on every call so that pointing the
//! relay at another server does not require a restart.

use std::sync::Arc;

use async_trait::async_trait;

use super::headers::json_headers;
use super::openai_compat::{ErrorFormat, OpenAICompatibleClient};
use super::provider::ChatAdapter;
use crate::config::{SecretSource, DEFAULT_LMSTUDIO_API_URL, LMSTUDIO_API_URL_VAR};
use crate::error::RelayResult;
use crate::llm::{ChatRequest, ChatResponse, ProviderId};

/// LM Studio local server adapter
pub struct LMStudioAdapter {
    http: OpenAICompatibleClient,
    secrets: Arc<dyn SecretSource>,
}

impl LMStudioAdapter {
    /// Create a new LM Studio adapter
    pub fn new(client: reqwest::Client, secrets: Arc<dyn SecretSource>) -> Self {
        Self {
            http: OpenAICompatibleClient::new(
                client,
                ProviderId::LMStudio,
                ErrorFormat::LocalServer,
            ),
            secrets,
        }
    }

    /// Base URL for the next call: the configured override, else the local default
    pub fn base_url(&self) -> String {
        self.secrets
            .get(LMSTUDIO_API_URL_VAR)
            .unwrap_or_else(|| DEFAULT_LMSTUDIO_API_URL.to_string())
    }
}

#[async_trait]
impl ChatAdapter for LMStudioAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::LMStudio
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, request: &ChatRequest) -> RelayResult<ChatResponse> {
        let base_url = self.base_url();
        self.http
            .chat_completions(&base_url, json_headers(), request)
            .await
    }
}
