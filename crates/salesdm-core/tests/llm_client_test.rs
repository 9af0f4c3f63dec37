//! HTTP LLM client against a local stub endpoint

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use salesdm_core::llm::{GENERIC_ERROR_REPLY, TIMEOUT_REPLY, UNAVAILABLE_REPLY};
use salesdm_core::{HttpLLMClient, LLMClient, LLMServiceConfig, SalesDmError, SalesResponder};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/chat", addr)
}

fn config(url: String, timeout_secs: u64) -> LLMServiceConfig {
    LLMServiceConfig { url, timeout_secs }
}

async fn stub_returning(body: Value) -> String {
    let app = Router::new().route(
        "/api/chat",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    spawn_stub(app).await
}

#[tokio::test]
async fn test_prompt_sent_as_message_field() {
    let app = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<Value>| async move {
            let prompt = body["message"].as_str().unwrap_or_default().to_string();
            Json(json!({ "response": format!("  echo: {}  ", prompt) }))
        }),
    );
    let url = spawn_stub(app).await;
    let client = HttpLLMClient::new(config(url, 5)).unwrap();

    let reply = client.complete("قیمت چنده").await.unwrap();
    assert_eq!(reply, "echo: قیمت چنده");

    let metrics = client.metrics().unwrap();
    assert_eq!(metrics.total_requests, 1);
    assert_eq!(metrics.total_errors, 0);
}

#[tokio::test]
async fn test_message_field_and_bare_string() {
    let url = stub_returning(json!({ "message": "پیام" })).await;
    let client = HttpLLMClient::new(config(url, 5)).unwrap();
    assert_eq!(client.complete("x").await.unwrap(), "پیام");

    let url = stub_returning(json!("  متن ساده ")).await;
    let client = HttpLLMClient::new(config(url, 5)).unwrap();
    assert_eq!(client.complete("x").await.unwrap(), "متن ساده");
}

#[tokio::test]
async fn test_unknown_shape_returned_as_json_text() {
    let url = stub_returning(json!({ "choices": [] })).await;
    let client = HttpLLMClient::new(config(url, 5)).unwrap();
    assert_eq!(client.complete("x").await.unwrap(), r#"{"choices":[]}"#);
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_stub(app).await;
    let client = HttpLLMClient::new(config(url.clone(), 5)).unwrap();

    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, SalesDmError::LlmStatus { status: 500, .. }));

    let responder = SalesResponder::from_config(config(url, 5), 2000).unwrap();
    assert_eq!(responder.generate_response("سلام", &[]).await, UNAVAILABLE_REPLY);
}

#[tokio::test]
async fn test_invalid_json_maps_to_generic_reply() {
    let app = Router::new().route("/api/chat", post(|| async { "not json at all" }));
    let url = spawn_stub(app).await;

    let client = HttpLLMClient::new(config(url.clone(), 5)).unwrap();
    assert!(matches!(
        client.complete("x").await.unwrap_err(),
        SalesDmError::Llm(_)
    ));

    let responder = SalesResponder::from_config(config(url, 5), 2000).unwrap();
    assert_eq!(responder.generate_response("سلام", &[]).await, GENERIC_ERROR_REPLY);
}

#[tokio::test]
async fn test_non_string_response_maps_to_generic_reply() {
    let url = stub_returning(json!({ "response": 42 })).await;
    let responder = SalesResponder::from_config(config(url, 5), 2000).unwrap();
    assert_eq!(responder.generate_response("سلام", &[]).await, GENERIC_ERROR_REPLY);
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "response": "too late" }))
        }),
    );
    let url = spawn_stub(app).await;

    let client = Arc::new(HttpLLMClient::new(config(url, 1)).unwrap());
    let err = client.complete("x").await.unwrap_err();
    assert!(matches!(err, SalesDmError::LlmTimeout(1)));
    assert_eq!(client.metrics().unwrap().total_timeouts, 1);

    let responder = SalesResponder::new(client, 2000);
    assert_eq!(responder.generate_response("سلام", &[]).await, TIMEOUT_REPLY);
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_unavailable_reply() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{}/api/chat", addr);
    let responder = SalesResponder::from_config(config(url, 2), 2000).unwrap();
    assert_eq!(responder.generate_response("سلام", &[]).await, UNAVAILABLE_REPLY);
}
