//! Error types for llm-relay
//!
//! Every failure on the chat path ends up as a [`RelayError`], which renders
//! as `{"error": ..., "details": ...}` with a 400 or 500 status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::llm::ProviderId;

/// Message returned for any request-processing failure without a more
/// specific upstream message
pub const PROCESSING_ERROR_MESSAGE: &str = "error processing LLM request";

/// Relay-level errors
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("unsupported provider")]
    UnsupportedProvider,

    #[error("missing provider, model or messages in request body")]
    MissingFields,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{} API key is not configured", .0.display_name())]
    MissingCredential(ProviderId),

    #[error("{} API key contains characters not allowed in a header", .0.display_name())]
    InvalidCredential(ProviderId),

    /// The provider answered with a non-success status
    #[error("{message}")]
    Upstream {
        provider: ProviderId,
        status: u16,
        message: String,
        details: String,
    },

    /// No usable response was received from the provider
    #[error("error processing LLM request")]
    Transport(#[from] reqwest::Error),

    /// The provider answered 2xx with a payload we cannot normalize
    #[error("error processing LLM request")]
    InvalidResponse { provider: ProviderId, reason: String },
}

impl RelayError {
    /// Build an upstream error whose message is also its diagnostic detail
    pub fn upstream(provider: ProviderId, status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Upstream {
            provider,
            status,
            details: message.clone(),
            message,
        }
    }

    /// HTTP status returned to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::UnsupportedProvider
            | RelayError::MissingFields
            | RelayError::InvalidRequest(_)
            | RelayError::MissingCredential(_)
            | RelayError::InvalidCredential(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. }
            | RelayError::Transport(_)
            | RelayError::InvalidResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable label, used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::UnsupportedProvider
            | RelayError::MissingFields
            | RelayError::InvalidRequest(_) => "validation_error",
            RelayError::MissingCredential(_) | RelayError::InvalidCredential(_) => {
                "credential_error"
            }
            RelayError::Upstream { .. } => "upstream_error",
            RelayError::Transport(_) => "transport_error",
            RelayError::InvalidResponse { .. } => "invalid_response",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            RelayError::Upstream { details, .. } => Some(details.clone()),
            RelayError::Transport(source) => Some(source.to_string()),
            RelayError::InvalidResponse { provider, reason } => Some(format!(
                "unexpected response from {} API: {}",
                provider.display_name(),
                reason
            )),
            _ => None,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "unsupported provider")]
    pub error: String,
    /// Diagnostic detail, usually the upstream provider's own message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&RelayError> for ErrorResponse {
    fn from(err: &RelayError) -> Self {
        Self {
            error: err.to_string(),
            details: err.details(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Result type alias for convenience
pub type RelayResult<T> = Result<T, RelayError>;
