//! In-process vector collection with brute-force cosine search.

use super::vector::{cosine_similarity, validate_vector};
use super::{rank, validate_limit, Error, Record, Result, ScoredRecord, VectorCollection};

/// A collection held entirely in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollection {
    name: String,
    records: Vec<Record>,
}

impl InMemoryCollection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Vec::new(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

impl VectorCollection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.position(id).is_some())
    }

    fn insert(&mut self, record: Record) -> Result<()> {
        let stored_dim = self.records.first().map(|r| r.vector.len());
        validate_vector(&record.vector, stored_dim)?;
        if self.position(&record.id).is_some() {
            return Err(Error::DuplicateId {
                collection: self.name.clone(),
                id: record.id,
            });
        }
        self.records.push(record);
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn get(&self, ids: &[String]) -> Result<Vec<Record>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.position(id).map(|i| self.records[i].clone()))
            .collect())
    }

    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>> {
        validate_limit(top_k)?;

        let scored = self
            .records
            .iter()
            .map(|record| {
                Ok(ScoredRecord {
                    similarity: cosine_similarity(vector, &record.vector)?,
                    record: record.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(rank(scored, top_k))
    }

    fn delete(&mut self, ids: &[String]) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id));
        Ok(before - self.records.len())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::RecordMetadata;

    fn record(id: &str, vector: Vec<f32>) -> Record {
        Record {
            id: id.to_string(),
            vector,
            document: "doc".to_string(),
            metadata: RecordMetadata {
                title: id.to_string(),
                url: "https://example.com".to_string(),
                source: "Test Source".to_string(),
                published_at: "None".to_string(),
                timestamp_added: None,
                raw_text: "doc".to_string(),
            },
        }
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut c = InMemoryCollection::new("recent");
        c.insert(record("a", vec![1.0])).unwrap();
        assert!(matches!(
            c.insert(record("a", vec![2.0])),
            Err(Error::DuplicateId { .. })
        ));
        assert_eq!(c.get_all().unwrap()[0].vector, vec![1.0]);
    }

    #[test]
    fn test_insert_rejects_unusable_vectors() {
        let mut c = InMemoryCollection::new("recent");
        assert!(matches!(c.insert(record("e", vec![])), Err(Error::EmptyVector)));

        c.insert(record("a", vec![1.0, 0.0])).unwrap();
        assert!(matches!(
            c.insert(record("nan", vec![f32::NAN, 0.0])),
            Err(Error::InvalidEmbedding(_))
        ));
        assert!(matches!(
            c.insert(record("wide", vec![1.0, 0.0, 0.0])),
            Err(Error::MismatchedDimensions {
                expected: 2,
                actual: 3
            })
        ));

        assert_eq!(c.count().unwrap(), 1);
        assert_eq!(c.query(&[1.0, 0.0], 3).unwrap().len(), 1);
    }

    #[test]
    fn test_query_ranks_and_truncates() {
        let mut c = InMemoryCollection::new("recent");
        c.insert(record("x", vec![1.0, 0.0])).unwrap();
        c.insert(record("y", vec![0.0, 1.0])).unwrap();
        c.insert(record("xy", vec![1.0, 1.0])).unwrap();

        let results = c.query(&[0.0, 1.0], 2).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "xy"]);
    }

    #[test]
    fn test_delete_counts_only_present_ids() {
        let mut c = InMemoryCollection::new("recent");
        c.insert(record("a", vec![1.0])).unwrap();
        c.insert(record("b", vec![1.0])).unwrap();

        assert_eq!(c.delete(&[]).unwrap(), 0);
        assert_eq!(
            c.delete(&["a".to_string(), "zzz".to_string()]).unwrap(),
            1
        );
        assert!(!c.exists("a").unwrap());
        assert!(c.exists("b").unwrap());
    }

    #[test]
    fn test_get_in_request_order() {
        let mut c = InMemoryCollection::new("recent");
        c.insert(record("a", vec![1.0])).unwrap();
        c.insert(record("b", vec![1.0])).unwrap();

        let got = c.get(&["b".to_string(), "a".to_string()]).unwrap();
        assert_eq!(got[0].id, "b");
        assert_eq!(got[1].id, "a");
    }
}
