//! llm-relay - Multi-provider LLM chat relay
//!
//! This library exposes a single chat endpoint that accepts a normalized
//! conversation, forwards it to OpenAI, Anthropic, Mistral or a local
//! LM Studio server, and returns the reply in one normalized shape.

pub mod config;
pub mod docs;
pub mod error;
pub mod llm;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::{Config, EnvSecrets, SecretSource, StaticSecrets};
pub use crate::error::{RelayError, RelayResult};
pub use crate::proxy::{ChatAdapter, Dispatcher, ProviderRegistry};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Routes chat requests to provider adapters
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create application state reading credentials from the process environment
    pub fn new(config: Config) -> Result<Self> {
        Self::with_secrets(config, Arc::new(EnvSecrets))
    }

    /// Create application state with an explicit credential source
    pub fn with_secrets(config: Config, secrets: Arc<dyn SecretSource>) -> Result<Self> {
        // Initialize HTTP client with connection pooling; provider calls are
        // not bounded by a timeout
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let registry = ProviderRegistry::with_defaults(http_client, &config, secrets);
        Ok(Self::with_registry(config, registry))
    }

    /// Create application state around a prepared adapter registry
    pub fn with_registry(config: Config, registry: ProviderRegistry) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            dispatcher: Dispatcher::new(registry),
        }
    }
}
