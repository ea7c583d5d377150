// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP server wiring: shared state, router, and error translation

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::embed::embed_handler;
use crate::api::similarity::{batch_similarity_handler, similarity_handler};
use crate::api::{ApiError, HealthResponse};
use crate::embeddings::OnnxEmbeddingModel;

/// Shared application state
///
/// The model slot is written exactly once, before the listener starts; every
/// request afterwards takes a cheap read lock and clones the `Arc`. The slot
/// stays empty only in tests exercising the not-loaded paths.
#[derive(Clone, Default)]
pub struct AppState {
    model: Arc<RwLock<Option<Arc<OnnxEmbeddingModel>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the loaded model into the shared slot.
    pub async fn set_model(&self, model: Arc<OnnxEmbeddingModel>) {
        *self.model.write().await = Some(model);
    }

    /// Returns the model handle, or the 503 error if it is not loaded yet.
    pub async fn model(&self) -> Result<Arc<OnnxEmbeddingModel>, ApiError> {
        self.model
            .read()
            .await
            .clone()
            .ok_or_else(|| ApiError::ServiceUnavailable("Model not loaded".to_string()))
    }
}

/// Builds the service router over the given state.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/embed", post(embed_handler))
        .route("/similarity", post(similarity_handler))
        .route("/batch-similarity", post(batch_similarity_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves requests until the process exits.
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Embedding service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiErrorResponse> {
    let model = state.model().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: true,
        model_name: model.model_name().to_string(),
        dimension: model.dimension(),
    }))
}

/// Wrapper translating [`ApiError`] into an HTTP response at the boundary.
pub struct ApiErrorResponse(pub ApiError);

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        ApiErrorResponse(err)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error_response = self.0.to_response();

        (status, Json(error_response)).into_response()
    }
}
