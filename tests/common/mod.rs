//! Common test utilities

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use money_transfer::api::{self, AppState};
use money_transfer::service::{Backoff, RetryPolicy};

/// A generous budget so contention in tests never trips the deadline.
pub fn test_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 1_000_000,
        deadline: Duration::from_secs(30),
        backoff: Backoff {
            base: Duration::from_micros(50),
            jitter: Duration::from_micros(200),
        },
    }
}

/// The API router over a fresh in-memory state.
pub fn test_app() -> Router {
    api::create_router().with_state(AppState::new(test_retry_policy()))
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// POST /customers/ and return the created customer's id.
pub async fn create_customer(app: &Router, name: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/customers/",
        json!({
            "name": name,
            "age": 25,
            "city": "London",
            "phoneNumber": "1234567890"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "customer creation failed: {body}");
    body["id"].as_i64().unwrap()
}

/// POST /accounts/ and return the created account's number.
pub async fn create_account(app: &Router, customer_id: i64, amount: f64) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/accounts/",
        json!({ "customerId": customer_id, "amount": amount }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "account creation failed: {body}");
    body["accountNumber"].as_str().unwrap().to_string()
}
