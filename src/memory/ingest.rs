//! Dedup-aware ingestion into the recent collection.

use chrono::Utc;
use tracing::{debug, info};

use crate::article::{identify, Article};
use crate::collection::{Record, RecordMetadata, VectorCollection};
use crate::embedding::Embedder;
use crate::errors::Error;
use crate::memory_types::IngestReport;

use super::store::MemoryStore;

impl<C: VectorCollection, E: Embedder> MemoryStore<C, E> {
    #[must_use = "handle the error or results may be lost"]
    /// Add articles to the recent collection.
    ///
    /// Articles are processed in order. An article is skipped when it has no
    /// summary, or when its id is already present in `recent`, so re-ingesting
    /// overlapping feed fetches never duplicates or updates a record.
    /// `timestamp_added` is stamped here with the current UTC time.
    ///
    /// # Errors
    ///
    /// The first embedding or collection failure aborts the call. Articles
    /// inserted before the failure stay in `recent`.
    pub fn add_articles(&mut self, articles: &[Article]) -> Result<IngestReport, Error> {
        let mut report = IngestReport::default();

        for article in articles {
            let Some(summary) = article.document() else {
                debug!(title = %article.title, "skipping article without summary");
                report.skipped_empty += 1;
                continue;
            };

            let id = identify(article);

            if self.recent.exists(&id)? {
                debug!(%id, "article already stored");
                report.skipped_duplicate += 1;
                continue;
            }

            let vector = self.embedder.embed(summary)?;

            let record = Record {
                id: id.clone(),
                vector,
                document: summary.to_string(),
                metadata: RecordMetadata {
                    title: article.title.clone(),
                    url: article.url.clone(),
                    source: article.source.clone(),
                    published_at: article.published_at_display(),
                    timestamp_added: Some(Utc::now().to_rfc3339()),
                    raw_text: summary.to_string(),
                },
            };
            self.recent.insert(record)?;
            debug!(%id, title = %article.title, "article stored");

            report.inserted += 1;
            report.ids.push(id);
        }

        info!(
            collection = self.recent.name(),
            inserted = report.inserted,
            skipped_empty = report.skipped_empty,
            skipped_duplicate = report.skipped_duplicate,
            "ingestion finished"
        );

        Ok(report)
    }
}
