// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Model file resolution
//!
//! The service loads its model by HuggingFace name. The ONNX export and
//! tokenizer are resolved through the hub cache: downloaded on first run,
//! served from disk afterwards.

use anyhow::{Context, Result};
use hf_hub::api::sync::Api;
use std::path::PathBuf;
use tracing::info;

/// On-disk locations of the files needed to build an [`super::OnnxEmbeddingModel`]
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// Path to the ONNX model file (model.onnx)
    pub model_path: PathBuf,

    /// Path to the tokenizer JSON file (tokenizer.json)
    pub tokenizer_path: PathBuf,
}

impl ModelFiles {
    /// Resolves the ONNX model and tokenizer for a model name through the
    /// HuggingFace hub cache.
    ///
    /// # Errors
    /// Returns error if the hub API cannot be initialized or either file
    /// cannot be fetched (no cache entry and no network).
    pub fn fetch(model_name: &str) -> Result<Self> {
        let api = Api::new().context("Failed to initialize HuggingFace hub API")?;
        let repo = api.model(model_name.to_string());

        info!("Resolving model files for {}", model_name);

        let model_path = repo
            .get("onnx/model.onnx")
            .with_context(|| format!("Failed to fetch onnx/model.onnx for {}", model_name))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .with_context(|| format!("Failed to fetch tokenizer.json for {}", model_name))?;

        Ok(Self {
            model_path,
            tokenizer_path,
        })
    }
}
