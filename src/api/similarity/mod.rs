// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Similarity API Module
//!
//! This module provides the POST /similarity and POST /batch-similarity
//! endpoints: cosine similarity between texts as the dot product of
//! L2-normalized embeddings.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{batch_similarity_handler, similarity_handler};
pub use request::{BatchSimilarityRequest, SimilarityRequest};
pub use response::{BatchSimilarityResponse, SimilarityResponse};
