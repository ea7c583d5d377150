// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Vector arithmetic for similarity scoring
//!
//! Cosine similarity of pre-normalized vectors reduces to a dot product;
//! everything here operates on plain f32 slices.

/// Dot product of two equal-length vectors.
///
/// For L2-normalized inputs this is the cosine similarity, in [-1, 1].
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scales a vector to unit length in place.
///
/// The zero vector is left unchanged.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Rounds a score to 4 decimal places for output.
pub fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

/// Rounds elapsed milliseconds to 2 decimal places for output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns the 0-based indices of scores at or above the threshold,
/// preserving input order.
pub fn above_threshold(scores: &[f32], threshold: f32) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score >= threshold)
        .map(|(i, _)| i)
        .collect()
}
