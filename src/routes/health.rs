//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Full health check with provider configuration status
//! - `/health/live` - Liveness probe

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::llm::ProviderId;
use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Running, but at least one provider lacks its credential
    Degraded,
}

/// Configuration state of one provider
#[derive(Debug, Serialize)]
pub struct ProviderCheck {
    pub configured: bool,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub providers: BTreeMap<&'static str, ProviderCheck>,
}

/// Simple health response for liveness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Full health check endpoint
///
/// Credentials are resolved at request time, so a degraded status only means
/// that calls to the unconfigured providers will currently be rejected.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let registry = state.dispatcher.registry();
    let providers: BTreeMap<_, _> = ProviderId::ALL
        .into_iter()
        .map(|provider| {
            (
                provider.as_str(),
                ProviderCheck {
                    configured: registry.is_configured(provider),
                },
            )
        })
        .collect();

    let status = if providers.values().all(|check| check.configured) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        providers,
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
