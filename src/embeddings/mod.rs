// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding model runtime
//!
//! Wraps ONNX Runtime around the all-MiniLM-L6-v2 sentence transformer and
//! provides the vector arithmetic the similarity endpoints are built on.

pub mod model_files;
pub mod onnx_model;
pub mod similarity;

pub use model_files::ModelFiles;
pub use onnx_model::OnnxEmbeddingModel;
