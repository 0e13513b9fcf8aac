//! Promotion of records from recent to important.

use tracing::{debug, info};

use crate::collection::VectorCollection;
use crate::embedding::Embedder;
use crate::errors::Error;

use super::store::MemoryStore;

impl<C: VectorCollection, E: Embedder> MemoryStore<C, E> {
    #[must_use = "handle the error or results may be lost"]
    /// Copy a record from the recent collection into the important collection.
    ///
    /// The copy keeps the id, vector, document and metadata (including the
    /// original `timestamp_added`). The recent record is left in place.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the record was copied
    /// - `Ok(false)` if `id` is not in the recent collection (nothing changes)
    ///
    /// # Errors
    ///
    /// Returns `collection::Error::DuplicateId` (wrapped) if the record was
    /// already promoted; the important copy is not replaced.
    pub fn mark_as_important(&mut self, id: &str) -> Result<bool, Error> {
        let Some(record) = self.recent.get(&[id.to_string()])?.into_iter().next() else {
            debug!(%id, "promotion skipped: not in recent collection");
            return Ok(false);
        };

        self.important.insert(record)?;

        info!(%id, collection = self.important.name(), "record promoted");
        Ok(true)
    }
}
