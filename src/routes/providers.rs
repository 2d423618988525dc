//! Provider listing endpoint
//!
//! `GET /api/llm/providers` describes every supported provider, whether its
//! credential is currently present, and the models suggested for it.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::llm::catalog::{self, ModelInfo};
use crate::llm::ProviderId;
use crate::AppState;

/// One provider entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderInfo {
    pub id: ProviderId,
    /// Label for display
    #[schema(example = "OpenAI")]
    pub name: &'static str,
    /// Whether calls need an API key
    pub requires_credential: bool,
    /// Whether calls can currently be made
    pub configured: bool,
    /// Suggested models, default first
    pub models: &'static [ModelInfo],
}

/// Provider listing response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

/// List supported providers
#[utoipa::path(
    get,
    path = "/api/llm/providers",
    tag = "Chat",
    responses(
        (status = 200, description = "Supported providers", body = ProvidersResponse)
    )
)]
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    let registry = state.dispatcher.registry();
    let providers = ProviderId::ALL
        .into_iter()
        .map(|id| ProviderInfo {
            id,
            name: catalog::label(id),
            requires_credential: id != ProviderId::LMStudio,
            configured: registry.is_configured(id),
            models: catalog::suggested_models(id),
        })
        .collect();

    Json(ProvidersResponse { providers })
}
