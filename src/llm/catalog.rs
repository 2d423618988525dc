//! Provider catalog
//!
//! Static description of each provider and the models the chat settings
//! screen offers for it.

use serde::Serialize;
use utoipa::ToSchema;

use super::types::ProviderId;

/// A model offered for a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ModelInfo {
    /// Identifier sent upstream as `model`
    #[schema(example = "gpt-4")]
    pub id: &'static str,
    /// Label for display
    #[schema(example = "GPT-4")]
    pub name: &'static str,
}

const fn model(id: &'static str, name: &'static str) -> ModelInfo {
    ModelInfo { id, name }
}

const OPENAI_MODELS: &[ModelInfo] = &[
    model("gpt-3.5-turbo", "GPT-3.5 Turbo"),
    model("gpt-4", "GPT-4"),
    model("gpt-4-turbo", "GPT-4 Turbo"),
];

const ANTHROPIC_MODELS: &[ModelInfo] = &[
    model("claude-3-opus-20240229", "Claude 3 Opus"),
    model("claude-3-sonnet-20240229", "Claude 3 Sonnet"),
    model("claude-3-haiku-20240307", "Claude 3 Haiku"),
];

const MISTRAL_MODELS: &[ModelInfo] = &[
    model("mistral-tiny", "Mistral Tiny"),
    model("mistral-small", "Mistral Small"),
    model("mistral-medium", "Mistral Medium"),
];

const LMSTUDIO_MODELS: &[ModelInfo] = &[model("local-model", "Local model")];

/// Suggested models for a provider; the first entry is the default choice
pub fn suggested_models(provider: ProviderId) -> &'static [ModelInfo] {
    match provider {
        ProviderId::OpenAI => OPENAI_MODELS,
        ProviderId::Anthropic => ANTHROPIC_MODELS,
        ProviderId::Mistral => MISTRAL_MODELS,
        ProviderId::LMStudio => LMSTUDIO_MODELS,
    }
}

/// Label shown in provider pickers
pub fn label(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::LMStudio => "LM Studio (Local)",
        other => other.display_name(),
    }
}
