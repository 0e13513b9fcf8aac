//! Expiry sweep for the recent collection.

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::collection::VectorCollection;
use crate::embedding::Embedder;
use crate::errors::Error;

use super::store::MemoryStore;

impl<C: VectorCollection, E: Embedder> MemoryStore<C, E> {
    #[must_use = "handle the error or results may be lost"]
    /// Delete recent records added more than `days` days ago.
    ///
    /// Scans the whole recent collection and removes, in one bulk delete,
    /// every record whose `timestamp_added` is strictly earlier than
    /// `now - days`. Records with a missing or unparsable `timestamp_added`
    /// never expire. The important collection is never touched.
    ///
    /// A window reaching past the earliest representable time expires nothing.
    ///
    /// # Returns
    ///
    /// Number of records deleted.
    pub fn cleanup_expired(&mut self, days: u32) -> Result<usize, Error> {
        let Some(cutoff) = Duration::try_days(i64::from(days))
            .and_then(|window| Utc::now().checked_sub_signed(window))
        else {
            info!(
                collection = self.recent.name(),
                days, "retention window out of range; nothing expires"
            );
            return Ok(0);
        };

        let mut expired = Vec::new();
        for record in self.recent.get_all()? {
            match record.metadata.added_at() {
                Some(added_at) if added_at < cutoff => expired.push(record.id),
                Some(_) => {}
                None => {
                    if let Some(raw) = record.metadata.timestamp_added.as_deref() {
                        warn!(
                            id = %record.id,
                            timestamp = raw,
                            "unparsable timestamp_added; record kept"
                        );
                    }
                }
            }
        }

        let removed = if expired.is_empty() {
            0
        } else {
            self.recent.delete(&expired)?
        };

        info!(
            collection = self.recent.name(),
            days,
            %cutoff,
            removed,
            "expiry sweep finished"
        );
        Ok(removed)
    }
}
