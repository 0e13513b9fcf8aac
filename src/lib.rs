//! newsmem - A semantic memory store for RSS news articles.
//!
//! Articles are identified by a content hash, embedded into vectors and kept
//! in two collections: `recent`, which ages out after a retention window, and
//! `important`, which only grows through explicit promotion.
//! All operations are synchronous (no async/await required).
//!
//! # Example
//!
//! ```no_run
//! use newsmem::{Config, MemoryStore};
//! use newsmem::source::{ArticleSource, JsonFileSource};
//!
//! let config = Config::load().expect("Failed to load config");
//! config.ensure_directories().expect("Failed to create directories");
//! let mut store = MemoryStore::open(&config).expect("Failed to initialize store");
//!
//! let articles = JsonFileSource::new("articles.json").fetch().expect("Failed to read articles");
//! store.cleanup_expired(config.retention_days).expect("Failed to expire records");
//! let report = store.add_articles(&articles).expect("Failed to ingest");
//! println!("Inserted {} article(s)", report.inserted);
//!
//! for hit in store.query_recent("new open-weight language models", config.top_k).unwrap() {
//!     println!("{:.2}: {}", hit.similarity, hit.record.metadata.title);
//! }
//!
//! if let Some(id) = report.ids.first() {
//!     store.mark_as_important(id).expect("Failed to promote");
//! }
//! ```
//!
//! # Mutability Requirements
//!
//! Methods that generate embeddings or write a collection (`add_articles`,
//! `query_*`, `mark_as_important`, `cleanup_expired`) require `&mut self`
//! because the embedding engine internally mutates state for ONNX tensor
//! allocations, and the store assumes a single writer.

pub mod article;
pub mod collection;
pub mod config;
pub mod embedding;
pub mod errors;
pub mod logging;
pub mod memory;
pub mod memory_types;
pub mod source;

// Re-export public API
pub use article::{identify, Article};
pub use collection::{
    InMemoryCollection, Record, RecordMetadata, ScoredRecord, SqliteCollection, VectorCollection,
    MAX_SEARCH_LIMIT,
};
pub use config::{Config, DEFAULT_RETENTION_DAYS, DEFAULT_TOP_K};
pub use embedding::{Embedder, EmbeddingEngine};
pub use errors::Error;
pub use memory::{MemoryStore, IMPORTANT_COLLECTION, RECENT_COLLECTION};
pub use memory_types::IngestReport;
