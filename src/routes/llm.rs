//! Chat endpoint
//!
//! `POST /api/llm` accepts a normalized chat request, dispatches it to the
//! selected provider and returns the normalized response.

use std::sync::Arc;
use std::time::Instant;

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ErrorResponse, RelayError, RelayResult};
use crate::llm::{ChatRequest, ChatRequestBody, ChatResponse, ChatResponseBody};
use crate::routes::metrics;
use crate::AppState;

/// Send a chat conversation to an LLM provider
///
/// The body is read as raw bytes so that malformed JSON is reported in the
/// same `{error, details}` shape as every other failure.
#[utoipa::path(
    post,
    path = "/api/llm",
    tag = "Chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Normalized chat completion", body = ChatResponseBody),
        (status = 400, description = "Invalid request or missing credential", body = ErrorResponse),
        (status = 500, description = "Provider or transport failure", body = ErrorResponse)
    )
)]
pub async fn llm_chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> RelayResult<Json<ChatResponse>> {
    let start = Instant::now();

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "Rejected chat request");
            metrics::record_request("unknown", err.kind(), start.elapsed().as_secs_f64());
            return Err(err);
        }
    };
    let provider = request.provider.as_str();

    match state.dispatcher.dispatch(&request).await {
        Ok(response) => {
            let elapsed = start.elapsed();
            metrics::record_request(provider, "success", elapsed.as_secs_f64());
            if let Some(tokens) = response.prompt_tokens() {
                metrics::record_tokens(provider, "prompt", tokens);
            }
            if let Some(tokens) = response.completion_tokens() {
                metrics::record_tokens(provider, "completion", tokens);
            }
            info!(
                provider = %provider,
                model = %request.model,
                latency_ms = %elapsed.as_millis(),
                "Chat request completed"
            );
            Ok(Json(response))
        }
        Err(err) => {
            metrics::record_request(provider, err.kind(), start.elapsed().as_secs_f64());
            warn!(provider = %provider, error = %err, kind = err.kind(), "Chat request failed");
            Err(err)
        }
    }
}

fn parse_request(body: &[u8]) -> RelayResult<ChatRequest> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::InvalidRequest(format!("body is not valid JSON: {}", e)))?;
    ChatRequest::from_json(&value)
}
