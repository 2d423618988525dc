//! Chat endpoint integration tests
//!
//! Exercises `POST /api/llm` end to end against mocked providers:
//! validation, credential checks, pass-through for OpenAI-compatible
//! providers, Anthropic translation, and error propagation.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use llm_relay::config::{ANTHROPIC_API_KEY_VAR, LMSTUDIO_API_URL_VAR, OPENAI_API_KEY_VAR};
use llm_relay::{routes, AppState, StaticSecrets};

use crate::common::{
    all_keys, chat_request, constants, test_config, unbound_base_url, TestHarness,
};
use crate::mocks::{AnthropicTestData, ChatTestData};

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_unsupported_provider_rejected_without_upstream_call() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&json!({
            "provider": "unknown-provider",
            "model": "test-model",
            "messages": [{"role": "user", "content": "Hello"}]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "unsupported provider"}));
    assert_eq!(harness.upstream_request_count().await, 0);
}

#[tokio::test]
async fn test_provider_checked_before_other_fields() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&json!({"provider": "cohere"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "unsupported provider");
}

#[tokio::test]
async fn test_missing_messages_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&json!({"provider": "openai", "model": "gpt-4"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "missing provider, model or messages in request body"
    }));
    assert_eq!(harness.upstream_request_count().await, 0);
}

#[tokio::test]
async fn test_missing_model_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&json!({
            "provider": "anthropic",
            "messages": [{"role": "user", "content": "Hello"}]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "missing provider, model or messages in request body");
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let harness = TestHarness::new().await;

    let response = harness.server.post("/api/llm").text("{not json").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("invalid request"));
    assert_eq!(harness.upstream_request_count().await, 0);
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&json!({
            "provider": "openai",
            "model": "gpt-4",
            "messages": [{"role": "tool", "content": "Hello"}]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(harness.upstream_request_count().await, 0);
}

// =============================================================================
// Credentials
// =============================================================================

#[tokio::test]
async fn test_missing_openai_key_rejected_without_upstream_call() {
    let harness = TestHarness::build(|_| StaticSecrets::new()).await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-3.5-turbo"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "OpenAI API key is not configured"}));
    assert_eq!(harness.upstream_request_count().await, 0);
}

#[tokio::test]
async fn test_empty_anthropic_key_treated_as_missing() {
    let harness =
        TestHarness::build(|_| StaticSecrets::new().with(ANTHROPIC_API_KEY_VAR, "")).await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("anthropic", "claude-2"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Anthropic API key is not configured"}));
    assert_eq!(harness.upstream_request_count().await, 0);
}

#[tokio::test]
async fn test_missing_mistral_key_does_not_affect_openai() {
    let harness = TestHarness::build(|_| {
        StaticSecrets::new().with(OPENAI_API_KEY_VAR, constants::TEST_OPENAI_API_KEY)
    })
    .await;
    harness
        .openai
        .mock_chat_success(ChatTestData::completion("Hi", 1, 1))
        .await;

    let mistral = harness
        .server
        .post("/api/llm")
        .json(&chat_request("mistral", "mistral-tiny"))
        .await;
    mistral.assert_status(StatusCode::BAD_REQUEST);
    mistral.assert_json(&json!({"error": "Mistral API key is not configured"}));

    let openai = harness
        .server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-3.5-turbo"))
        .await;
    openai.assert_status_ok();
}

// =============================================================================
// OpenAI-compatible providers
// =============================================================================

#[tokio::test]
async fn test_openai_response_passed_through() {
    let harness = TestHarness::new().await;
    let upstream = ChatTestData::completion("Hello from OpenAI!", 10, 5);
    harness
        .openai
        .mock_chat_success_with_key(constants::TEST_OPENAI_API_KEY, upstream.clone())
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-3.5-turbo"))
        .await;

    response.assert_status_ok();
    response.assert_json(&upstream);
}

#[tokio::test]
async fn test_openai_receives_defaults_and_messages() {
    let harness = TestHarness::new().await;
    harness
        .openai
        .mock_chat_success(ChatTestData::completion("ok", 1, 1))
        .await;

    harness
        .server
        .post("/api/llm")
        .json(&json!({
            "provider": "openai",
            "model": "gpt-4",
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hello"}
            ]
        }))
        .await
        .assert_status_ok();

    let bodies = harness.openai.received_bodies().await;
    assert_eq!(
        bodies,
        vec![json!({
            "model": "gpt-4",
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Hello"}
            ],
            "temperature": 0.7,
            "max_tokens": 1000
        })]
    );
}

#[tokio::test]
async fn test_sampling_parameters_forwarded() {
    let harness = TestHarness::new().await;
    harness
        .mistral
        .mock_chat_success(ChatTestData::completion("ok", 1, 1))
        .await;

    harness
        .server
        .post("/api/llm")
        .json(&json!({
            "provider": "mistral",
            "model": "mistral-small",
            "messages": [{"role": "user", "content": "Hello"}],
            "temperature": 0.2,
            "max_tokens": 50
        }))
        .await
        .assert_status_ok();

    let bodies = harness.mistral.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["temperature"], 0.2);
    assert_eq!(bodies[0]["max_tokens"], 50);
}

#[tokio::test]
async fn test_mistral_response_passed_through() {
    let harness = TestHarness::new().await;
    let upstream = ChatTestData::completion("Bonjour!", 7, 3);
    harness
        .mistral
        .mock_chat_success_with_key(constants::TEST_MISTRAL_API_KEY, upstream.clone())
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("mistral", "mistral-tiny"))
        .await;

    response.assert_status_ok();
    response.assert_json(&upstream);
    assert_eq!(harness.openai.received_requests().await.len(), 0);
}

#[tokio::test]
async fn test_lmstudio_needs_no_credential() {
    let harness =
        TestHarness::build(|lmstudio_url| StaticSecrets::new().with(LMSTUDIO_API_URL_VAR, lmstudio_url))
            .await;
    let upstream = ChatTestData::completion("Hello from LM Studio!", 4, 6);
    harness.lmstudio.mock_chat_success(upstream.clone()).await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("lmstudio", "local-model"))
        .await;

    response.assert_status_ok();
    response.assert_json(&upstream);

    let requests = harness.lmstudio.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_null_usage_passed_through() {
    let harness = TestHarness::new().await;
    let upstream = json!({
        "id": "chatcmpl-null-usage",
        "choices": [{"message": {"role": "assistant", "content": "Hi"}}],
        "usage": null
    });
    harness.openai.mock_chat_success(upstream.clone()).await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-4"))
        .await;

    response.assert_status_ok();
    response.assert_json(&upstream);
}

#[tokio::test]
async fn test_array_content_passed_through() {
    let harness = TestHarness::new().await;
    let upstream = json!({
        "id": "mistral-parts",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": [{"type": "text", "text": "hi"}]
            },
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 2, "completion_tokens": 1, "total_tokens": 3}
    });
    harness.mistral.mock_chat_success(upstream.clone()).await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("mistral", "mistral-small"))
        .await;

    response.assert_status_ok();
    response.assert_json(&upstream);
}

#[tokio::test]
async fn test_usage_without_total_passed_through() {
    let harness = TestHarness::new().await;
    let upstream = json!({
        "choices": [{"message": {"role": "assistant", "content": "local"}}],
        "usage": {"prompt_tokens": 3, "completion_tokens": 4}
    });
    harness.lmstudio.mock_chat_success(upstream.clone()).await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("lmstudio", "local-model"))
        .await;

    response.assert_status_ok();
    response.assert_json(&upstream);
}

#[tokio::test]
async fn test_repeated_request_is_idempotent() {
    let harness = TestHarness::new().await;
    harness
        .openai
        .mock_chat_success(ChatTestData::completion("same", 2, 2))
        .await;

    let body = chat_request("openai", "gpt-3.5-turbo");
    let first: Value = harness.server.post("/api/llm").json(&body).await.json();
    let second: Value = harness.server.post("/api/llm").json(&body).await.json();

    assert_eq!(first, second);
    assert_eq!(harness.openai.received_requests().await.len(), 2);
}

// =============================================================================
// Anthropic
// =============================================================================

#[tokio::test]
async fn test_anthropic_request_translated() {
    let harness = TestHarness::new().await;
    harness
        .anthropic
        .mock_messages_success(
            constants::TEST_ANTHROPIC_API_KEY,
            AnthropicTestData::message("Hello from Anthropic!", 10, 5),
        )
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&json!({
            "provider": "anthropic",
            "model": "claude-3-haiku-20240307",
            "messages": [
                {"role": "system", "content": "You are helpful."},
                {"role": "user", "content": "Hello"}
            ]
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "choices": [{"message": {"role": "assistant", "content": "Hello from Anthropic!"}}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }));

    let requests = harness.anthropic.received_requests().await;
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!({
            "model": "claude-3-haiku-20240307",
            "messages": [{"role": "user", "content": "Hello"}],
            "system": "You are helpful.",
            "temperature": 0.7,
            "max_tokens": 1000
        })
    );
}

#[tokio::test]
async fn test_anthropic_without_system_message_sends_empty_system() {
    let harness = TestHarness::new().await;
    harness
        .anthropic
        .mock_messages_success(
            constants::TEST_ANTHROPIC_API_KEY,
            AnthropicTestData::message("ok", 1, 1),
        )
        .await;

    harness
        .server
        .post("/api/llm")
        .json(&chat_request("anthropic", "claude-2"))
        .await
        .assert_status_ok();

    let requests = harness.anthropic.received_requests().await;
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["system"], "");
}

#[tokio::test]
async fn test_anthropic_error_propagated() {
    let harness = TestHarness::new().await;
    harness
        .anthropic
        .mock_messages_error(400, AnthropicTestData::error("max_tokens: must be positive"))
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("anthropic", "claude-2"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "max_tokens: must be positive",
        "details": "max_tokens: must be positive"
    }));
}

// =============================================================================
// Upstream and transport errors
// =============================================================================

#[tokio::test]
async fn test_openai_error_message_propagated() {
    let harness = TestHarness::new().await;
    harness
        .openai
        .mock_chat_error(401, ChatTestData::error("Incorrect API key provided"))
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-4"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Incorrect API key provided",
        "details": "Incorrect API key provided"
    }));
}

#[tokio::test]
async fn test_mistral_error_without_message_uses_generic_text() {
    let harness = TestHarness::new().await;
    harness
        .mistral
        .mock_chat_error(503, json!({"detail": "overloaded"}))
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("mistral", "mistral-tiny"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "error in Mistral API");
}

#[tokio::test]
async fn test_lmstudio_error_names_local_server() {
    let harness = TestHarness::new().await;
    harness
        .lmstudio
        .mock_chat_error(500, json!({"error": "model not loaded"}))
        .await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("lmstudio", "local-model"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "error connecting to LMStudio: model not loaded",
        "details": "model not loaded"
    }));
}

#[tokio::test]
async fn test_unparseable_success_body_is_server_error() {
    let harness = TestHarness::new().await;
    harness.openai.mock_chat_garbage().await;

    let response = harness
        .server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-4"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "error processing LLM request");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("unexpected response from OpenAI API"));
}

#[tokio::test]
async fn test_unreachable_provider_reports_transport_error() {
    let unbound = unbound_base_url().await;
    let config = test_config(&unbound, &unbound, &unbound);
    let state = AppState::with_secrets(config, Arc::new(all_keys())).unwrap();
    let server = TestServer::new(routes::create_router(Arc::new(state))).unwrap();

    let response = server
        .post("/api/llm")
        .json(&chat_request("openai", "gpt-4"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "error processing LLM request");

    // details carry the client's own error text, which names the target URL
    let details = body["details"].as_str().unwrap();
    assert!(
        details.contains(&format!("{}/chat/completions", unbound)),
        "unexpected details: {details}"
    );
}
