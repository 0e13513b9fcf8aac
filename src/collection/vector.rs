//! Embedding BLOB conversion and cosine similarity computation.

use super::{Error, Result};

/// Convert a vector of f32 values to a BLOB (little-endian bytes).
///
/// # Errors
///
/// Returns `Error::EmptyVector` for an empty vector.
pub fn vec_to_blob(vec: &[f32]) -> Result<Vec<u8>> {
    if vec.is_empty() {
        return Err(Error::EmptyVector);
    }
    Ok(vec.iter().flat_map(|&x| x.to_le_bytes()).collect())
}

/// Check a vector before it is stored.
///
/// `expected_dim` is the dimension of the records already in the collection,
/// if any; one collection only ever holds vectors of a single dimension.
///
/// # Errors
///
/// - Returns `Error::EmptyVector` for an empty vector.
/// - Returns `Error::InvalidEmbedding` if any value is NaN or infinite.
/// - Returns `Error::MismatchedDimensions` if the dimension differs from `expected_dim`.
pub fn validate_vector(vec: &[f32], expected_dim: Option<usize>) -> Result<()> {
    if vec.is_empty() {
        return Err(Error::EmptyVector);
    }

    if vec.iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidEmbedding(
            "Vector contains NaN or infinite values".to_string(),
        ));
    }

    match expected_dim {
        Some(expected) if expected != vec.len() => Err(Error::MismatchedDimensions {
            expected,
            actual: vec.len(),
        }),
        _ => Ok(()),
    }
}

/// Convert a BLOB (little-endian bytes) back to f32 values.
///
/// # Errors
///
/// Returns `Error::InvalidBlobSize` if the blob is empty or not a multiple of 4 bytes.
pub fn blob_to_vec(blob: &[u8]) -> Result<Vec<f32>> {
    if blob.is_empty() || blob.len() % 4 != 0 {
        return Err(Error::InvalidBlobSize { actual: blob.len() });
    }
    let mut vec = Vec::with_capacity(blob.len() / 4);
    for chunk in blob.chunks_exact(4) {
        let val = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        vec.push(val);
    }
    Ok(vec)
}

/// Compute cosine similarity between two vectors.
///
/// # Errors
///
/// - Returns `Error::EmptyVector` if either vector is empty.
/// - Returns `Error::MismatchedDimensions` if vectors have different lengths.
/// - Returns `Error::InvalidEmbedding` if any value is NaN or infinite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::EmptyVector);
    }

    if a.len() != b.len() {
        return Err(Error::MismatchedDimensions {
            expected: a.len(),
            actual: b.len(),
        });
    }

    if a.iter().any(|x| !x.is_finite()) || b.iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidEmbedding(
            "Vector contains NaN or infinite values".to_string(),
        ));
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}
