// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use embedding_service::{
    api::{start_server, AppState},
    config::ServiceConfig,
    embeddings::{ModelFiles, OnnxEmbeddingModel},
    version,
};
use std::{env, sync::Arc, time::Instant};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", version::get_version_string());

    let config = ServiceConfig::default();

    // Load the model before accepting traffic; any failure here is fatal.
    info!("Loading model: {}", config.model_name);
    let start = Instant::now();

    let files = ModelFiles::fetch(&config.model_name)?;
    let model = OnnxEmbeddingModel::load(
        &config.model_name,
        &files.model_path,
        &files.tokenizer_path,
        config.dimension,
    )?;

    info!(
        "Model loaded in {:.0}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    info!("Embedding dimension: {}", model.dimension());

    let state = AppState::new();
    state.set_model(Arc::new(model)).await;

    start_server(state, config.bind_addr).await
}
