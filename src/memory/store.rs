//! Core memory store struct owning both collections and the embedder.

use std::path::Path;

use crate::collection::{SqliteCollection, VectorCollection};
use crate::config::Config;
use crate::embedding::{Embedder, EmbeddingEngine};
use crate::errors::Error;

/// Name of the time-bounded collection.
pub const RECENT_COLLECTION: &str = "ai_news_recent";
/// Name of the permanent collection, populated only by promotion.
pub const IMPORTANT_COLLECTION: &str = "ai_news_important";

/// Two-tier semantic memory for news articles.
///
/// `recent` receives every ingested article and is aged out by
/// [`cleanup_expired`](MemoryStore::cleanup_expired); `important` only grows
/// through [`mark_as_important`](MemoryStore::mark_as_important).
///
/// # Mutability Requirements
///
/// Every operation that embeds text or writes a collection takes `&mut self`.
/// The store assumes a single writer; the borrow checker enforces it within a
/// process, which keeps the exists-then-insert step of ingestion race-free.
pub struct MemoryStore<C = SqliteCollection, E = EmbeddingEngine> {
    pub(crate) recent: C,
    pub(crate) important: C,
    pub(crate) embedder: E,
}

impl<C: VectorCollection, E: Embedder> MemoryStore<C, E> {
    /// Assemble a store from explicit parts.
    pub fn new(recent: C, important: C, embedder: E) -> Self {
        MemoryStore {
            recent,
            important,
            embedder,
        }
    }

    /// The recent collection.
    pub fn recent(&self) -> &C {
        &self.recent
    }

    /// The important collection.
    pub fn important(&self) -> &C {
        &self.important
    }
}

impl MemoryStore<SqliteCollection, EmbeddingEngine> {
    /// Open the persistent store described by `config`.
    ///
    /// Both collections share the SQLite file at `config.database_path`; the
    /// embedding model is loaded from (or downloaded into) `config.model_cache`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database path contains path traversal sequences (e.g., "../")
    /// - Parent directory cannot be canonicalized
    /// - Database cannot be opened
    /// - Embedding model cannot be loaded
    pub fn open(config: &Config) -> Result<Self, Error> {
        let (recent, important) = open_collections(config)?;
        let embedder = EmbeddingEngine::new(&config.embedding_model, &config.model_cache)?;

        Ok(MemoryStore::new(recent, important, embedder))
    }
}

/// Open the recent and important collections from `config.database_path`.
///
/// Useful for read-only access that never needs the embedding model.
pub fn open_collections(config: &Config) -> Result<(SqliteCollection, SqliteCollection), Error> {
    let db_path = config.database_path.as_path();
    validate_database_path(db_path)?;

    let recent = SqliteCollection::open(db_path, RECENT_COLLECTION)?;
    let important = SqliteCollection::open(db_path, IMPORTANT_COLLECTION)?;
    Ok((recent, important))
}

/// Reject database paths that could escape the intended directory.
pub(crate) fn validate_database_path(db_path: &Path) -> Result<(), Error> {
    use std::path::Component;

    // Path traversal guard: reject parent directory components (works on all platforms)
    for component in db_path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(Error::Config(
                "Invalid database path: contains '..' which may escape the intended directory"
                    .to_string(),
            ));
        }
    }

    // Validate parent directory exists and is accessible
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::canonicalize(parent).map_err(|e| {
                Error::Config(format!(
                    "Invalid database path: parent directory not accessible: {}",
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Reject blank text before it reaches the embedder.
pub(crate) fn validate_query_text(text: &str) -> Result<&str, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(text)
}
