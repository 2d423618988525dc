//! Configuration management for llm-relay
//!
//! Static settings (bind address, hosted provider base URLs) are loaded once
//! from environment variables at startup. Provider credentials are not part of
//! [`Config`]: they are looked up through a [`SecretSource`] on every request,
//! so rotating a key takes effect without a restart.

use std::collections::HashMap;
use std::env;

use anyhow::{Context, Result};

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the Anthropic API key
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// Environment variable holding the Mistral API key
pub const MISTRAL_API_KEY_VAR: &str = "MISTRAL_API_KEY";
/// Environment variable overriding the LM Studio base URL
pub const LMSTUDIO_API_URL_VAR: &str = "LMSTUDIO_API_URL";

/// LM Studio base URL used when `LMSTUDIO_API_URL` is unset
pub const DEFAULT_LMSTUDIO_API_URL: &str = "http://localhost:1234/v1";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// OpenAI API base URL
    pub openai_api_url: String,
    /// Anthropic API base URL
    pub anthropic_api_url: String,
    /// Mistral API base URL
    pub mistral_api_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("RELAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("RELAY_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            openai_api_url: lookup("OPENAI_API_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            anthropic_api_url: lookup("ANTHROPIC_API_URL")
                .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string()),
            mistral_api_url: lookup("MISTRAL_API_URL")
                .unwrap_or_else(|| "https://api.mistral.ai/v1".to_string()),
        })
    }
}

/// Source of per-request secrets (API keys, local server URLs)
///
/// Implementations are consulted on every upstream call and must not cache.
/// An empty value is reported as absent.
pub trait SecretSource: Send + Sync {
    /// Look up a secret by its variable name
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads secrets from the process environment at lookup time
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}

/// Fixed in-memory secrets, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    /// Create an empty secret set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|value| !value.is_empty()).cloned()
    }
}
