//! Memory store data types.

use serde::Serialize;

/// Outcome of an `add_articles` run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    /// Articles embedded and inserted into the recent collection.
    pub inserted: usize,
    /// Articles skipped for lacking a summary.
    pub skipped_empty: usize,
    /// Articles skipped because their id was already in the recent collection.
    pub skipped_duplicate: usize,
    /// Ids of inserted articles, in input order.
    pub ids: Vec<String>,
}

impl IngestReport {
    /// Total number of articles looked at.
    pub fn processed(&self) -> usize {
        self.inserted + self.skipped_empty + self.skipped_duplicate
    }
}
