// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embed;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod similarity;

pub use embed::{embed_handler, EmbedRequest, EmbedResponse};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::HealthResponse;
pub use http_server::{create_app, start_server, ApiErrorResponse, AppState};
pub use similarity::{
    batch_similarity_handler, similarity_handler, BatchSimilarityRequest,
    BatchSimilarityResponse, SimilarityRequest, SimilarityResponse,
};
