//! Similarity queries against either collection.

use crate::collection::{ScoredRecord, VectorCollection};
use crate::embedding::Embedder;
use crate::errors::Error;

use super::store::{validate_query_text, MemoryStore};

impl<C: VectorCollection, E: Embedder> MemoryStore<C, E> {
    #[must_use = "handle the error or results may be lost"]
    /// Find the `top_k` recent records closest to `text`.
    ///
    /// Returns fewer than `top_k` results when the collection is smaller.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Query is empty
    /// - `top_k` is 0 or exceeds `MAX_SEARCH_LIMIT`
    /// - Embedding generation fails
    /// - The collection query fails
    pub fn query_recent(&mut self, text: &str, top_k: usize) -> Result<Vec<ScoredRecord>, Error> {
        let vector = self.embed_query(text)?;
        Ok(self.recent.query(&vector, top_k)?)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Find the `top_k` important records closest to `text`.
    ///
    /// Same contract as [`query_recent`](MemoryStore::query_recent).
    pub fn query_important(
        &mut self,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredRecord>, Error> {
        let vector = self.embed_query(text)?;
        Ok(self.important.query(&vector, top_k)?)
    }

    fn embed_query(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        let text = validate_query_text(text)?;
        self.embedder.embed(text)
    }
}
