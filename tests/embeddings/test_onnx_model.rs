// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end model tests
//!
//! These need the ONNX export and tokenizer on disk (fetched through the
//! HuggingFace hub cache on first run), so they are ignored by default.

use embedding_service::config::{EMBEDDING_DIMENSION, MODEL_NAME};
use embedding_service::embeddings::similarity::dot;
use embedding_service::embeddings::{ModelFiles, OnnxEmbeddingModel};

fn load_model() -> OnnxEmbeddingModel {
    let files = ModelFiles::fetch(MODEL_NAME).expect("model files should resolve");
    OnnxEmbeddingModel::load(
        MODEL_NAME,
        &files.model_path,
        &files.tokenizer_path,
        EMBEDDING_DIMENSION,
    )
    .expect("model should load")
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_model_metadata() {
    let model = load_model();
    assert_eq!(model.dimension(), 384);
    assert_eq!(model.model_name(), MODEL_NAME);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_encode_shapes() {
    let model = load_model();
    let texts = vec!["first".to_string(), "second".to_string()];

    let embeddings = model.encode(&texts, true).await.unwrap();
    assert_eq!(embeddings.len(), 2);
    assert!(embeddings.iter().all(|e| e.len() == 384));
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_encode_is_deterministic() {
    let model = load_model();
    let texts = vec!["the same text".to_string()];

    let first = model.encode(&texts, true).await.unwrap();
    let second = model.encode(&texts, true).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_normalized_embeddings_have_unit_length() {
    let model = load_model();
    let texts = vec!["normalize me".to_string()];

    let embeddings = model.encode(&texts, true).await.unwrap();
    let magnitude = embeddings[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((magnitude - 1.0).abs() < 1e-4);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_identical_texts_have_similarity_one() {
    let model = load_model();
    let texts = vec!["a".to_string(), "a".to_string()];

    let embeddings = model.encode(&texts, true).await.unwrap();
    let similarity = dot(&embeddings[0], &embeddings[1]);
    assert!((similarity - 1.0).abs() < 1e-4);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_unnormalized_encode_skips_scaling() {
    let model = load_model();
    let texts = vec!["a reasonably long sentence about memory".to_string()];

    let raw = model.encode(&texts, false).await.unwrap();
    let magnitude = raw[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    // Mean-pooled BERT outputs are not unit length in general
    assert!((magnitude - 1.0).abs() > 1e-3);
}
