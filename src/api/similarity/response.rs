// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response types for the similarity endpoints

use serde::{Deserialize, Serialize};

/// Response body for POST /similarity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResponse {
    /// Cosine similarity in [-1, 1], rounded to 4 decimals
    pub similarity: f32,

    /// Model used for embedding
    pub model: String,
}

/// Response body for POST /batch-similarity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSimilarityResponse {
    /// One score per candidate, in input order, rounded to 4 decimals
    pub scores: Vec<f32>,

    /// 0-based indices into `candidates` whose score is >= threshold
    pub above_threshold: Vec<usize>,

    /// Model used for embedding
    pub model: String,
}
