//! Vector collections: named sets of (id, vector, document, metadata) records.
//!
//! This module provides:
//! - `VectorCollection`: the operations the memory store needs from an index
//! - `Record` / `RecordMetadata` / `ScoredRecord`: stored and returned units
//! - `sqlite`: persistent backend sharing one database file across collections
//! - `memory`: in-process backend with brute-force similarity
//! - `vector`: BLOB conversion and cosine similarity

pub mod memory;
pub mod sqlite;
pub mod vector;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::InMemoryCollection;
pub use sqlite::SqliteCollection;

/// Maximum allowed `top_k` for similarity queries.
pub const MAX_SEARCH_LIMIT: usize = 10_000;

/// Metadata stored alongside every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub title: String,
    pub url: String,
    pub source: String,
    /// Rendered publication date (`None` when the article had none).
    pub published_at: String,
    /// RFC 3339 UTC insertion time. Records without one never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_added: Option<String>,
    pub raw_text: String,
}

impl RecordMetadata {
    /// Parsed insertion time, `None` if missing or unparsable.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp_added
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub vector: Vec<f32>,
    /// Document text (the article summary).
    pub document: String,
    pub metadata: RecordMetadata,
}

/// A record returned by a similarity query.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: Record,
    /// Cosine similarity to the query vector (higher = closer).
    pub similarity: f64,
}

/// Error types for collection operations.
#[derive(Debug)]
pub enum Error {
    Sqlite(String),
    DuplicateId { collection: String, id: String },
    InvalidBlobSize { actual: usize },
    MismatchedDimensions { expected: usize, actual: usize },
    EmptyVector,
    InvalidEmbedding(String),
    InvalidLimit(String),
    Metadata(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Sqlite(msg) => write!(f, "Database error: {}", msg),
            Error::DuplicateId { collection, id } => {
                write!(f, "Record {} already exists in collection {}", id, collection)
            }
            Error::InvalidBlobSize { actual } => {
                write!(
                    f,
                    "Invalid BLOB size: {} bytes is not a non-empty multiple of 4",
                    actual
                )
            }
            Error::MismatchedDimensions { expected, actual } => {
                write!(
                    f,
                    "Mismatched dimensions: expected {} dimensions, got {} dimensions",
                    expected, actual
                )
            }
            Error::EmptyVector => write!(f, "Cannot compute similarity with empty vector"),
            Error::InvalidEmbedding(msg) => write!(f, "Invalid embedding: {}", msg),
            Error::InvalidLimit(msg) => write!(f, "Invalid limit: {}", msg),
            Error::Metadata(msg) => write!(f, "Invalid record metadata: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Sqlite(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Metadata(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validate a similarity query limit is within acceptable bounds.
pub fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidLimit(
            "Limit must be greater than 0".to_string(),
        ));
    }
    if limit > MAX_SEARCH_LIMIT {
        return Err(Error::InvalidLimit(format!(
            "Limit {} exceeds maximum allowed ({})",
            limit, MAX_SEARCH_LIMIT
        )));
    }
    Ok(())
}

/// Operations the memory store requires from a vector index.
///
/// Both the `recent` and `important` collections are driven through this
/// trait. Ranking and distance are owned by the implementation.
pub trait VectorCollection {
    /// Collection name.
    fn name(&self) -> &str;

    /// Whether a record with this id exists.
    fn exists(&self, id: &str) -> Result<bool>;

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateId` if the id is already present; existing
    /// records are never overwritten.
    fn insert(&mut self, record: Record) -> Result<()>;

    /// Every record in the collection.
    fn get_all(&self) -> Result<Vec<Record>>;

    /// Records matching `ids`, in request order. Unknown ids are skipped.
    fn get(&self, ids: &[String]) -> Result<Vec<Record>>;

    /// Up to `top_k` records nearest to `vector`, best first.
    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>>;

    /// Delete records by id in one call. Returns the number removed.
    fn delete(&mut self, ids: &[String]) -> Result<usize>;

    /// Number of records.
    fn count(&self) -> Result<usize>;
}

/// Sort scored records best first and keep `top_k`.
pub(crate) fn rank(mut scored: Vec<ScoredRecord>, top_k: usize) -> Vec<ScoredRecord> {
    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    scored
}
