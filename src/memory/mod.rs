//! Vector memory store orchestrating the recent and important collections.
//!
//! Provides dedup-aware ingestion, promotion, similarity queries and the
//! expiry sweep over two `VectorCollection`s and one `Embedder`.

mod ingest;
mod promote;
mod retention;
mod search;

// pub(crate): module internals hidden; public items re-exported explicitly via lib.rs
pub(crate) mod store;

pub use crate::memory_types::IngestReport;
pub use store::{open_collections, MemoryStore, IMPORTANT_COLLECTION, RECENT_COLLECTION};
