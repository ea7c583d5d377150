// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration and not-loaded (503) path tests
//!
//! These tests exercise the router without a loaded model: every operation
//! must answer 503 service_unavailable until the model slot is filled, and
//! transport-level errors (unknown route, wrong method, malformed JSON) must
//! map to the right status codes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use embedding_service::api::{create_app, AppState};
use tower::ServiceExt; // for `oneshot`

fn app_without_model() -> axum::Router {
    create_app(AppState::new())
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_before_model_load_returns_503() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error_type"], "service_unavailable");
    assert_eq!(body["message"], "Model not loaded");
}

#[tokio::test]
async fn test_embed_before_model_load_returns_503() {
    let response = app_without_model()
        .oneshot(json_post("/embed", r#"{"texts": ["hello"]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error_type"], "service_unavailable");
}

#[tokio::test]
async fn test_model_check_precedes_validation() {
    // An invalid body still answers 503 while the model slot is empty.
    let response = app_without_model()
        .oneshot(json_post("/embed", r#"{"texts": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_similarity_before_model_load_returns_503() {
    let response = app_without_model()
        .oneshot(json_post("/similarity", r#"{"text1": "a", "text2": "b"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_batch_similarity_before_model_load_returns_503() {
    let response = app_without_model()
        .oneshot(json_post(
            "/batch-similarity",
            r#"{"query": "q", "candidates": ["c"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_returns_405() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/embed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = app_without_model()
        .oneshot(json_post("/embed", r#"{"texts": ["#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_required_field_is_client_error() {
    // Body is valid JSON but missing `texts`; axum rejects before the handler.
    let response = app_without_model()
        .oneshot(json_post("/embed", r#"{"normalize": true}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
