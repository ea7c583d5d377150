// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request types for the similarity endpoints

use crate::api::ApiError;
use crate::config::MAX_BATCH_SIZE;
use serde::{Deserialize, Serialize};

/// Request body for POST /similarity
///
/// Both texts are always embedded L2-normalized; any caller-supplied
/// normalization preference is ignored (there is no such field here, and
/// unknown fields are dropped during deserialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub text1: String,
    pub text2: String,
}

/// Request body for POST /batch-similarity
///
/// # Example
/// ```json
/// {
///   "query": "the user prefers dark mode",
///   "candidates": ["dark mode enabled", "likes light theme"],
///   "threshold": 0.85
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSimilarityRequest {
    /// Query text compared against every candidate
    pub query: String,

    /// Candidate texts (1-100 items)
    pub candidates: Vec<String>,

    /// Minimum score for a candidate index to appear in `above_threshold`
    /// Default: 0.85
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_threshold() -> f32 {
    0.85
}

impl BatchSimilarityRequest {
    /// Validates the batch similarity request
    ///
    /// # Validation Rules
    /// 1. **candidates**: Must not be empty
    /// 2. **candidates**: Must contain at most 100 items
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.candidates.is_empty() {
            return Err(ApiError::ValidationError {
                field: "candidates".to_string(),
                message: "No candidates provided".to_string(),
            });
        }

        if self.candidates.len() > MAX_BATCH_SIZE {
            return Err(ApiError::ValidationError {
                field: "candidates".to_string(),
                message: format!(
                    "Maximum {} candidates per request (got {})",
                    MAX_BATCH_SIZE,
                    self.candidates.len()
                ),
            });
        }

        Ok(())
    }
}
