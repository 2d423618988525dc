//! Prometheus metrics endpoint
//!
//! Exposes relay metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "llm_relay_requests_total",
        "Total number of chat requests processed"
    );
    metrics::describe_counter!("llm_relay_tokens_total", "Total tokens reported by providers");
    metrics::describe_histogram!(
        "llm_relay_request_duration_seconds",
        "Chat request duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a chat request outcome
pub fn record_request(provider: &str, status: &str, duration_secs: f64) {
    metrics::counter!(
        "llm_relay_requests_total",
        "provider" => provider.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("llm_relay_request_duration_seconds", "provider" => provider.to_string())
        .record(duration_secs);
}

/// Record tokens reported by a provider
pub fn record_tokens(provider: &str, token_type: &str, count: u64) {
    metrics::counter!(
        "llm_relay_tokens_total",
        "provider" => provider.to_string(),
        "type" => token_type.to_string()
    )
    .increment(count);
}
