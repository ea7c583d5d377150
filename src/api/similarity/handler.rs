// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /similarity and POST /batch-similarity HTTP handlers

use crate::api::http_server::{ApiErrorResponse, AppState};
use crate::api::similarity::{
    BatchSimilarityRequest, BatchSimilarityResponse, SimilarityRequest, SimilarityResponse,
};
use crate::api::ApiError;
use crate::embeddings::similarity::{above_threshold, dot, round4};
use axum::{extract::State, Json};
use tracing::error;

/// POST /similarity handler
///
/// Embeds both texts in one normalized model call and returns their cosine
/// similarity (dot product of unit vectors), rounded to 4 decimals.
pub async fn similarity_handler(
    State(state): State<AppState>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResponse>, ApiErrorResponse> {
    let model = state.model().await?;

    let texts = vec![request.text1, request.text2];
    let embeddings = model.encode(&texts, true).await.map_err(|e| {
        error!("Similarity error: {}", e);
        ApiError::InternalError(e.to_string())
    })?;

    let similarity = round4(dot(&embeddings[0], &embeddings[1]));

    Ok(Json(SimilarityResponse {
        similarity,
        model: model.model_name().to_string(),
    }))
}

/// POST /batch-similarity handler
///
/// Encodes `[query] + candidates` together in one normalized model call, then
/// scores the query against each candidate in input order. `above_threshold`
/// holds the 0-based candidate indices with `scores[i] >= threshold`.
pub async fn batch_similarity_handler(
    State(state): State<AppState>,
    Json(request): Json<BatchSimilarityRequest>,
) -> Result<Json<BatchSimilarityResponse>, ApiErrorResponse> {
    let model = state.model().await?;
    request.validate()?;

    let mut texts = Vec::with_capacity(1 + request.candidates.len());
    texts.push(request.query);
    texts.extend(request.candidates);

    let embeddings = model.encode(&texts, true).await.map_err(|e| {
        error!("Batch similarity error: {}", e);
        ApiError::InternalError(e.to_string())
    })?;

    let (query_embedding, candidate_embeddings) = embeddings
        .split_first()
        .ok_or_else(|| ApiError::InternalError("Encoder returned no vectors".to_string()))?;

    let scores: Vec<f32> = candidate_embeddings
        .iter()
        .map(|candidate| round4(dot(query_embedding, candidate)))
        .collect();

    let above_threshold = above_threshold(&scores, request.threshold);

    Ok(Json(BatchSimilarityResponse {
        scores,
        above_threshold,
        model: model.model_name().to_string(),
    }))
}
