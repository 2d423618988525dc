//! Provider adapter abstraction
//!
//! Defines the trait every upstream adapter implements and the registry the
//! dispatcher selects adapters from.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, SecretSource};
use crate::error::{RelayError, RelayResult};
use crate::llm::{ChatRequest, ChatResponse, ProviderId};

use super::{AnthropicAdapter, LMStudioAdapter, MistralAdapter, OpenAIAdapter};

/// Trait defining the interface for provider adapters
///
/// An adapter owns everything provider-specific: endpoint URL, credential
/// lookup, authentication headers, payload translation, and mapping of the
/// upstream reply (or error) to the normalized shape.
///
/// # Security
///
/// Implementations MUST:
/// - Resolve credentials from their [`SecretSource`] on every call
/// - Fail with [`RelayError::MissingCredential`] before any network I/O when a
///   required credential is absent
/// - Never forward inbound client headers upstream
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    /// Provider served by this adapter
    fn provider(&self) -> ProviderId;

    /// Whether the adapter currently has what it needs to call upstream
    fn is_configured(&self) -> bool;

    /// Send one chat request upstream and normalize the reply
    async fn send(&self, request: &ChatRequest) -> RelayResult<ChatResponse>;
}

/// Resolve a required credential or fail with a provider-specific error
pub fn require_secret(
    secrets: &dyn SecretSource,
    key: &str,
    provider: ProviderId,
) -> RelayResult<String> {
    secrets
        .get(key)
        .ok_or(RelayError::MissingCredential(provider))
}

/// Adapters keyed by provider
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderId, Arc<dyn ChatAdapter>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four built-in adapters sharing one HTTP client
    pub fn with_defaults(
        client: reqwest::Client,
        config: &Config,
        secrets: Arc<dyn SecretSource>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OpenAIAdapter::new(
            client.clone(),
            config,
            secrets.clone(),
        )));
        registry.register(Arc::new(AnthropicAdapter::new(
            client.clone(),
            config,
            secrets.clone(),
        )));
        registry.register(Arc::new(MistralAdapter::new(
            client.clone(),
            config,
            secrets.clone(),
        )));
        registry.register(Arc::new(LMStudioAdapter::new(client, secrets)));
        registry
    }

    /// Register an adapter under its own provider, replacing any previous one
    pub fn register(&mut self, adapter: Arc<dyn ChatAdapter>) -> Option<Arc<dyn ChatAdapter>> {
        self.adapters.insert(adapter.provider(), adapter)
    }

    /// Look up the adapter for a provider
    pub fn get(&self, provider: ProviderId) -> Option<&Arc<dyn ChatAdapter>> {
        self.adapters.get(&provider)
    }

    /// Whether the provider has a registered adapter with its credential present
    pub fn is_configured(&self, provider: ProviderId) -> bool {
        self.get(provider)
            .map(|adapter| adapter.is_configured())
            .unwrap_or(false)
    }
}
