//! Embedding gateway: the `Embedder` trait and a synchronous ONNX engine.
//!
//! The default model is all-MiniLM-L6-v2 (384 dimensions) with mean pooling
//! and L2 normalization.

use std::path::Path;

use hf_hub::api::sync::ApiBuilder;
use ort::inputs;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use crate::errors::Error;

/// Maximum number of tokens fed to the model; longer texts are truncated.
const MAX_TOKENS: usize = 512;

/// Turns text into a vector.
///
/// Implementations must be deterministic for a fixed model. Errors are
/// returned to the caller as-is; nothing in this crate retries them.
pub trait Embedder {
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error>;
}

impl<F> Embedder for F
where
    F: FnMut(&str) -> Result<Vec<f32>, Error>,
{
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        self(text)
    }
}

/// ONNX embedding engine for synchronous text-to-vector conversion.
pub struct EmbeddingEngine {
    session: Session,
    tokenizer: Tokenizer,
    requires_token_type_ids: bool,
}

impl EmbeddingEngine {
    /// Load model from `cache_dir` or download it on first use.
    ///
    /// Uses the blocking `hf_hub` API; files are downloaded once and reused.
    pub fn new(model_id: &str, cache_dir: &Path) -> Result<Self, Error> {
        let api = ApiBuilder::new()
            .with_cache_dir(cache_dir.to_path_buf())
            .with_progress(false)
            .build()?;
        let repo = api.model(model_id.to_string());

        let model_path = repo
            .get("onnx/model.onnx")
            .or_else(|_| repo.get("model.onnx"))?;
        let tokenizer_path = repo.get("tokenizer.json")?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(ort::Error::from)?
            .commit_from_file(&model_path)?;

        let requires_token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        info!(model = model_id, "embedding model loaded");

        Ok(EmbeddingEngine {
            session,
            tokenizer,
            requires_token_type_ids,
        })
    }

    /// Generate an L2-normalized embedding for a single text.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` for blank text, and inference errors as-is.
    pub fn embed_text(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let encoding = self.tokenizer.encode(text, true)?;
        let input_ids = encoding.get_ids();
        let attention_mask = encoding.get_attention_mask();

        if input_ids.is_empty() {
            return Err(Error::EmptyInput);
        }

        let seq_len = input_ids.len();

        let input_ids_vec: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
        let attention_mask_vec: Vec<i64> = attention_mask.iter().map(|&m| m as i64).collect();

        let input_ids_tensor = Tensor::from_array(([1usize, seq_len], input_ids_vec))?;
        let attention_mask_tensor = Tensor::from_array(([1usize, seq_len], attention_mask_vec))?;

        let outputs = if self.requires_token_type_ids {
            let token_type_ids_vec: Vec<i64> = vec![0i64; seq_len];
            let token_type_ids_tensor =
                Tensor::from_array(([1usize, seq_len], token_type_ids_vec))?;
            self.session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])?
        } else {
            self.session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])?
        };

        let (shape, data) = outputs
            .get("last_hidden_state")
            .or_else(|| outputs.get("token_embeddings"))
            .ok_or_else(|| {
                Error::Inference(
                    "Output tensor 'last_hidden_state' or 'token_embeddings' not found".to_string(),
                )
            })?
            .try_extract_tensor::<f32>()?;

        if shape.len() != 3 || shape[0] != 1 || shape[2] <= 0 {
            return Err(Error::Inference(format!(
                "Expected output shape (1, seq_len, hidden), got {:?}",
                shape
            )));
        }

        let hidden_dim = shape[2] as usize;
        Ok(mean_pool(data, attention_mask, hidden_dim))
    }
}

impl Embedder for EmbeddingEngine {
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        self.embed_text(text)
    }
}

/// Average token vectors weighted by the attention mask, then L2-normalize.
fn mean_pool(data: &[f32], attention_mask: &[u32], hidden_dim: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden_dim];

    for (chunk, &mask) in data.chunks(hidden_dim).zip(attention_mask.iter()) {
        let mask_value = mask as f32;
        for (pooled_value, &x) in pooled.iter_mut().zip(chunk.iter()) {
            *pooled_value += x * mask_value;
        }
    }

    let mask_sum: f32 = attention_mask
        .iter()
        .map(|&m| m as f32)
        .sum::<f32>()
        .max(1e-9);

    for value in pooled.iter_mut() {
        *value /= mask_sum;
    }

    l2_normalize(&pooled)
}

fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|&x| x * x).sum::<f32>().sqrt();
    let norm = norm.max(1e-9);

    vec.iter().map(|&x| x / norm).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize_magnitude() {
        let normalized = l2_normalize(&[3.0, 4.0]);
        assert!((normalized[0] - 0.6).abs() < 1e-6);
        assert!((normalized[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let normalized = l2_normalize(&[0.0, 0.0, 0.0]);
        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mean_pool_ignores_masked_tokens() {
        // Two tokens of dim 2; the second is padding.
        let data = [2.0, 0.0, 100.0, 100.0];
        let pooled = mean_pool(&data, &[1, 0], 2);
        assert!((pooled[0] - 1.0).abs() < 1e-6);
        assert!(pooled[1].abs() < 1e-6);
    }

    #[test]
    fn test_mean_pool_averages_tokens() {
        let data = [1.0, 0.0, 0.0, 1.0];
        let pooled = mean_pool(&data, &[1, 1], 2);
        let expected = 1.0 / 2.0f32.sqrt();
        assert!((pooled[0] - expected).abs() < 1e-6);
        assert!((pooled[1] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_closure_is_an_embedder() {
        let mut calls = 0;
        let mut embedder = |text: &str| -> Result<Vec<f32>, Error> {
            calls += 1;
            Ok(vec![text.len() as f32])
        };
        assert_eq!(embedder.embed("abc").unwrap(), vec![3.0]);
        drop(embedder);
        assert_eq!(calls, 1);
    }

    fn default_engine() -> EmbeddingEngine {
        let config = crate::config::Config::default();
        EmbeddingEngine::new(&config.embedding_model, &config.model_cache).expect("load model")
    }

    #[ignore]
    #[test]
    fn test_integration_simple_text() {
        let mut engine = default_engine();
        let embedding = engine.embed("hello world").expect("embed text");

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|&x| x * x).sum::<f32>().sqrt();
        assert!(
            (norm - 1.0).abs() < 0.01,
            "Embedding should be L2-normalized"
        );
        assert!(embedding.iter().all(|&x| x.is_finite()));
    }

    #[ignore]
    #[test]
    fn test_integration_deterministic() {
        let mut engine = default_engine();
        let a = engine.embed("multimodal AI research").unwrap();
        let b = engine.embed("multimodal AI research").unwrap();
        assert_eq!(a, b);
    }

    #[ignore]
    #[test]
    fn test_integration_empty_string_rejected() {
        let mut engine = default_engine();
        assert!(matches!(engine.embed("  "), Err(Error::EmptyInput)));
    }

    #[ignore]
    #[test]
    fn test_integration_long_text_truncation() {
        let mut engine = default_engine();
        let long_text = "This is a sentence. ".repeat(400);
        let embedding = engine.embed(&long_text).expect("embed long text");
        assert_eq!(embedding.len(), 384);
    }
}
