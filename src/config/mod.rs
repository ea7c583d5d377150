// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Service configuration
//!
//! The service is a loopback sidecar for a memory-consolidation pipeline and
//! takes no environment-variable or file configuration: the bind address,
//! model name, and embedding dimension are fixed for the life of the binary.

use std::net::SocketAddr;

/// Model served by this process
pub const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Output dimension of all-MiniLM-L6-v2
pub const EMBEDDING_DIMENSION: usize = 384;

/// Maximum number of texts (or candidates) accepted per request
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Loopback address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// HuggingFace model name loaded at startup
    pub model_name: String,

    /// Expected embedding dimension (validated at model load)
    pub dimension: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8384)),
            model_name: MODEL_NAME.to_string(),
            dimension: EMBEDDING_DIMENSION,
        }
    }
}
