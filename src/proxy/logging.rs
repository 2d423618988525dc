//! Request logging utilities for upstream provider calls
//!
//! Provides structured logging with a short correlation ID so that the start,
//! upstream response, and outcome of one relayed call can be tied together.

use std::time::Instant;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::llm::ProviderId;

/// Context for tracking one upstream call
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this call (for log correlation)
    pub trace_id: String,
    /// When the call started
    pub start_time: Instant,
    /// Provider handling this call
    pub provider: ProviderId,
    /// Upstream path being called
    pub endpoint: String,
    /// Model requested
    pub model: Option<String>,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(provider: ProviderId, endpoint: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            provider,
            endpoint: endpoint.to_string(),
            model: None,
        }
    }

    /// Set the model for this call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, url: &str, messages: usize) {
        debug!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            url = %url,
            messages = %messages,
            "Sending request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, content_length: Option<u64>) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            endpoint = %self.endpoint,
            status = %status,
            content_length = ?content_length,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log successful completion
    pub fn log_request_complete(&self, tokens: Option<u64>) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            tokens = ?tokens,
            elapsed_ms = %self.elapsed_ms(),
            "Upstream call completed"
        );
    }

    /// Log an upstream failure
    pub fn log_error(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            endpoint = %self.endpoint,
            model = ?self.model,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Upstream call failed"
        );
    }

    /// Log connection error (no response was received)
    pub fn log_connection_error(&self, error: &str, url: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            url = %url,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Connection to upstream failed"
        );
    }
}
