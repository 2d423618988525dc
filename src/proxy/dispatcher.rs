//! Chat request dispatcher
//!
//! Selects the adapter for a validated request's provider and hands back the
//! adapter's normalized response or error. One upstream call per
//! request, no retries.

use tracing::{debug, info};

use super::provider::ProviderRegistry;
use crate::error::{RelayError, RelayResult};
use crate::llm::{ChatRequest, ChatResponse};

/// Routes normalized requests to provider adapters
#[derive(Clone)]
pub struct Dispatcher {
    registry: ProviderRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over a registry
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Registered adapters
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Dispatch an already validated request to its provider's adapter
    pub async fn dispatch(&self, request: &ChatRequest) -> RelayResult<ChatResponse> {
        let adapter = self
            .registry
            .get(request.provider)
            .ok_or(RelayError::UnsupportedProvider)?;

        info!(
            provider = %request.provider,
            model = %request.model,
            messages = %request.messages.len(),
            "Dispatching chat request"
        );
        debug!(
            temperature = %request.temperature,
            max_tokens = %request.max_tokens,
            "Sampling parameters"
        );

        adapter.send(request).await
    }
}
