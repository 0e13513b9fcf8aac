//! JSON response types and formatting for CLI output.

use serde::Serialize;

use newsmem::collection::{Record, ScoredRecord};

/// Response for an ingest run.
#[derive(Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub inserted: usize,
    pub skipped_empty: usize,
    pub skipped_duplicate: usize,
    /// Records removed by the pre-ingest sweep; absent with `--no-cleanup`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<usize>,
    pub ids: Vec<String>,
}

/// Response for search results.
#[derive(Serialize)]
pub struct SearchResponse {
    pub collection: String,
    pub results: Vec<SearchResultItem>,
}

/// Individual search result item.
#[derive(Serialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
    pub similarity: f64,
}

impl From<ScoredRecord> for SearchResultItem {
    fn from(scored: ScoredRecord) -> Self {
        let ScoredRecord { record, similarity } = scored;
        SearchResultItem {
            id: record.id,
            title: record.metadata.title,
            source: record.metadata.source,
            url: record.metadata.url,
            published_at: record.metadata.published_at,
            similarity,
        }
    }
}

/// Response for retrieving a specific record.
#[derive(Serialize)]
pub struct GetResponse {
    pub id: String,
    pub collection: String,
    pub document: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
    pub timestamp_added: Option<String>,
}

impl GetResponse {
    pub fn new(collection: &str, record: Record) -> Self {
        GetResponse {
            id: record.id,
            collection: collection.to_string(),
            document: record.document,
            title: record.metadata.title,
            url: record.metadata.url,
            source: record.metadata.source,
            published_at: record.metadata.published_at,
            timestamp_added: record.metadata.timestamp_added,
        }
    }
}

/// Response for listing a collection.
#[derive(Serialize)]
pub struct ListResponse {
    pub collection: String,
    pub records: Vec<ListItem>,
}

/// Individual list item.
#[derive(Serialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub timestamp_added: Option<String>,
}

/// Response for a successful promotion.
#[derive(Serialize)]
pub struct PromoteResponse {
    pub status: String,
    pub id: String,
}

/// Response for an expiry sweep.
#[derive(Serialize)]
pub struct CleanupResponse {
    pub status: String,
    pub days: u32,
    pub deleted: usize,
}

/// Response for id derivation.
#[derive(Serialize)]
pub struct IdResponse {
    pub id: String,
    pub key: String,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsmem::collection::RecordMetadata;

    fn record() -> Record {
        Record {
            id: "abc".to_string(),
            vector: vec![1.0, 0.0],
            document: "summary".to_string(),
            metadata: RecordMetadata {
                title: "Title".to_string(),
                url: "https://example.com".to_string(),
                source: "Feed".to_string(),
                published_at: "None".to_string(),
                timestamp_added: None,
                raw_text: "summary".to_string(),
            },
        }
    }

    #[test]
    fn test_serialize_ingest_response_without_cleanup() {
        let response = IngestResponse {
            status: "ingested".to_string(),
            inserted: 2,
            skipped_empty: 1,
            skipped_duplicate: 0,
            expired: None,
            ids: vec!["a".to_string(), "b".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"inserted\":2"));
        assert!(json.contains("\"skipped_empty\":1"));
        assert!(!json.contains("expired"));
    }

    #[test]
    fn test_search_item_from_scored_record() {
        let item = SearchResultItem::from(ScoredRecord {
            record: record(),
            similarity: 0.95,
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"title\":\"Title\""));
        assert!(json.contains("\"published_at\":\"None\""));
        assert!(json.contains("\"similarity\":0.95"));
        assert!(!json.contains("vector"));
    }

    #[test]
    fn test_get_response_keeps_missing_timestamp() {
        let json = serde_json::to_string(&GetResponse::new("ai_news_recent", record())).unwrap();
        assert!(json.contains("\"collection\":\"ai_news_recent\""));
        assert!(json.contains("\"timestamp_added\":null"));
    }
}
