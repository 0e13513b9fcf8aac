//! News article input type and content-derived identity.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Separator between the fields hashed into an article id.
const ID_DELIMITER: char = '|';

/// Rendering used for an article without a publication date.
const MISSING_PUBLISHED_AT: &str = "None";

/// A normalized news article as produced by an [`ArticleSource`](crate::source::ArticleSource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Article summary; becomes the stored document. Articles without one are never stored.
    #[serde(default)]
    pub summary: Option<String>,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
}

impl Article {
    /// Summary text if present and not blank.
    pub fn document(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .filter(|summary| !summary.trim().is_empty())
    }

    /// Publication date in the textual form used for ids and metadata.
    pub fn published_at_display(&self) -> String {
        render_published_at(self.published_at.as_ref())
    }
}

/// Render a publication date as `YYYY-MM-DD HH:MM:SS[.ffffff]+HH:MM`, or `None` when absent.
///
/// Sub-second precision is kept at microseconds and only printed when non-zero,
/// so ids stay stable with stores populated by earlier pipeline versions.
pub fn render_published_at(published_at: Option<&DateTime<FixedOffset>>) -> String {
    match published_at {
        None => MISSING_PUBLISHED_AT.to_string(),
        Some(dt) if dt.nanosecond() / 1_000 % 1_000_000 != 0 => {
            dt.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string()
        }
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
    }
}

/// The `title|url|published_at` string an article id is hashed from.
pub fn identity_key(article: &Article) -> String {
    format!(
        "{}{ID_DELIMITER}{}{ID_DELIMITER}{}",
        article.title,
        article.url,
        article.published_at_display()
    )
}

/// Derive the stable id of an article.
///
/// SHA-256 (lowercase hex) over [`identity_key`]. Articles sharing all
/// three fields are the same logical article.
pub fn identify(article: &Article) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity_key(article).as_bytes());
    hex::encode(hasher.finalize())
}
