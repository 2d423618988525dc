//! OpenAPI specification for the relay API
//!
//! Aggregates the chat endpoints and their schemas into a single OpenAPI document.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::llm::{
    catalog::ModelInfo, ChatMessage, ChatRequestBody, ChatResponseBody, Choice, ChoiceMessage,
    ProviderId, Role, Usage,
};
use crate::routes::providers::{ProviderInfo, ProvidersResponse};

/// OpenAPI specification for llm-relay
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LLM Relay API",
        version = "0.1.0",
        description = "Normalized chat completions across OpenAI, Anthropic, Mistral and LM Studio"
    ),
    paths(
        crate::routes::llm::llm_chat,
        crate::routes::providers::list_providers
    ),
    components(
        schemas(
            // Types
            ProviderId,
            Role,
            ChatMessage,
            ModelInfo,
            // Request
            ChatRequestBody,
            // Response
            Usage,
            ChoiceMessage,
            Choice,
            ChatResponseBody,
            ProviderInfo,
            ProvidersResponse,
            // Error
            ErrorResponse,
        )
    ),
    tags(
        (name = "Chat", description = "Chat completion endpoints")
    )
)]
pub struct ApiDoc;
