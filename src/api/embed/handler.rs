// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed HTTP handler

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::http_server::{ApiErrorResponse, AppState};
use crate::api::ApiError;
use crate::embeddings::similarity::round2;
use axum::{extract::State, Json};
use std::time::Instant;
use tracing::error;

/// POST /embed handler
///
/// Generates one embedding per input text in a single model call.
/// Model availability is checked before request constraints, so a not-yet-
/// loaded model answers 503 even for an invalid body.
pub async fn embed_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, ApiErrorResponse> {
    let model = state.model().await?;
    request.validate()?;

    let start = Instant::now();

    let embeddings = model
        .encode(&request.texts, request.normalize)
        .await
        .map_err(|e| {
            error!("Embedding error: {}", e);
            ApiError::InternalError(e.to_string())
        })?;

    let elapsed_ms = round2(start.elapsed().as_secs_f64() * 1000.0);

    Ok(Json(EmbedResponse {
        count: embeddings.len(),
        embeddings,
        model: model.model_name().to_string(),
        dimension: model.dimension(),
        elapsed_ms,
    }))
}
