//! Shared upstream HTTP plumbing
//!
//! Sends one POST to a provider and hands back the raw status and body. Each
//! adapter decides how to interpret a non-success body.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use super::logging::RequestContext;
use crate::error::RelayResult;

/// Raw upstream reply
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// POST a JSON body and read the whole reply
///
/// Network failures and body read failures surface as
/// [`RelayError::Transport`](crate::error::RelayError::Transport). No retry
/// and no timeout beyond the client's own defaults.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &reqwest::Client,
    ctx: &RequestContext,
    url: &str,
    headers: HeaderMap,
    body: &B,
) -> RelayResult<UpstreamReply> {
    let response = client
        .post(url)
        .headers(headers)
        .json(body)
        .send()
        .await
        .map_err(|e| {
            ctx.log_connection_error(&e.to_string(), url);
            e
        })?;

    let status = response.status();
    ctx.log_upstream_response(status.as_u16(), response.content_length());

    let body = response.bytes().await.map_err(|e| {
        ctx.log_error(&e.to_string());
        e
    })?;

    Ok(UpstreamReply { status, body })
}

/// Extract `error.message` from a provider error body
///
/// With `accept_plain_string`, a bare `{"error": "..."}` is accepted too.
pub fn extract_error_message(body: &[u8], accept_plain_string: bool) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let error = value.get("error")?;

    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    if accept_plain_string {
        return error.as_str().map(str::to_string);
    }

    None
}
