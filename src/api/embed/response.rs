// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedResponse type for POST /embed endpoint

use serde::{Deserialize, Serialize};

/// Response body for POST /embed endpoint
///
/// # Example
/// ```json
/// {
///   "embeddings": [[0.1, 0.2, ...]],
///   "model": "sentence-transformers/all-MiniLM-L6-v2",
///   "dimension": 384,
///   "count": 1,
///   "elapsed_ms": 12.34
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// One embedding per input text, in input order
    pub embeddings: Vec<Vec<f32>>,

    /// Model used for embedding
    pub model: String,

    /// Embedding dimension (384)
    pub dimension: usize,

    /// Number of input texts
    pub count: usize,

    /// Wall-clock encode time in milliseconds, rounded to 2 decimals
    pub elapsed_ms: f64,
}
