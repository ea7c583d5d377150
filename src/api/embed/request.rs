// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for POST /embed endpoint

use crate::api::ApiError;
use crate::config::MAX_BATCH_SIZE;
use serde::{Deserialize, Serialize};

/// Request body for POST /embed endpoint
///
/// # Example
/// ```json
/// {
///   "texts": ["Hello world", "Another text"],
///   "normalize": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Text strings to embed (1-100 items)
    pub texts: Vec<String>,

    /// Whether to L2-normalize the returned vectors
    /// Default: true
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_normalize() -> bool {
    true
}

impl EmbedRequest {
    /// Validates the embed request
    ///
    /// # Validation Rules
    /// 1. **texts**: Must not be empty
    /// 2. **texts**: Must contain at most 100 items
    ///
    /// # Returns
    /// - `Ok(())` if validation passes
    /// - `Err(ApiError)` with a clear error message if validation fails
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.texts.is_empty() {
            return Err(ApiError::ValidationError {
                field: "texts".to_string(),
                message: "No texts provided".to_string(),
            });
        }

        if self.texts.len() > MAX_BATCH_SIZE {
            return Err(ApiError::ValidationError {
                field: "texts".to_string(),
                message: format!(
                    "Maximum {} texts per request (got {})",
                    MAX_BATCH_SIZE,
                    self.texts.len()
                ),
            });
        }

        Ok(())
    }
}
