//! Error types for newsmem.

use thiserror::Error;

/// Main error type for newsmem operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vector collection (index) error.
    #[error("Collection error: {0}")]
    Collection(#[from] crate::collection::Error),

    /// ONNX inference error.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Tokenization error.
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// ONNX session error.
    #[error("ONNX session error: {0}")]
    Onnx(#[from] ort::Error),

    /// HuggingFace Hub error.
    #[error("HuggingFace Hub error: {0}")]
    HfHub(#[from] hf_hub::api::sync::ApiError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or whitespace-only text where content is required.
    #[error("Input cannot be empty")]
    EmptyInput,

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<tokenizers::Error> for Error {
    fn from(err: tokenizers::Error) -> Self {
        Error::Tokenization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_error_is_wrapped() {
        let err: Error = crate::collection::Error::DuplicateId {
            collection: "ai_news_important".to_string(),
            id: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Collection(_)));
        let msg = err.to_string();
        assert!(msg.contains("ai_news_important"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_empty_input_display() {
        assert_eq!(Error::EmptyInput.to_string(), "Input cannot be empty");
    }
}
