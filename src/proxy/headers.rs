//! Header construction for upstream provider requests
//!
//! Client headers are never forwarded: every upstream request carries only the
//! headers built here, so inbound cookies or tokens cannot leak to a provider.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE,
};

/// Anthropic API protocol version sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const ANTHROPIC_VERSION_HEADER: HeaderName = HeaderName::from_static("anthropic-version");
const ANTHROPIC_API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// JSON content type only, for servers that need no authentication
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// JSON content type plus `Authorization: Bearer <key>`
pub fn bearer_headers(api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = json_headers();
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// JSON content type plus Anthropic's `x-api-key` and `anthropic-version`
pub fn anthropic_headers(api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = json_headers();
    let mut value = HeaderValue::from_str(api_key)?;
    value.set_sensitive(true);
    headers.insert(ANTHROPIC_API_KEY_HEADER, value);
    headers.insert(
        ANTHROPIC_VERSION_HEADER,
        HeaderValue::from_static(ANTHROPIC_VERSION),
    );
    Ok(headers)
}
