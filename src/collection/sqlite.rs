//! SQLite-backed vector collection.
//!
//! Every collection lives in the shared `records` table, partitioned by the
//! `collection` column, so `recent` and `important` can share one file.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

use super::vector::{blob_to_vec, cosine_similarity, validate_vector, vec_to_blob};
use super::{
    rank, validate_limit, Error, Record, RecordMetadata, Result, ScoredRecord, VectorCollection,
};

/// Initialize the schema shared by all collections.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            document TEXT NOT NULL,
            embedding BLOB NOT NULL,
            metadata TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        "#,
    )?;
    Ok(())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<(String, String, Vec<u8>, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode(raw: (String, String, Vec<u8>, String)) -> Result<Record> {
    let (id, document, blob, metadata) = raw;
    Ok(Record {
        id,
        vector: blob_to_vec(&blob)?,
        document,
        metadata: serde_json::from_str::<RecordMetadata>(&metadata)?,
    })
}

/// A named collection stored in a SQLite database.
pub struct SqliteCollection {
    conn: Connection,
    name: String,
}

impl SqliteCollection {
    /// Open or create the database at `path` and bind to collection `name`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema initialization fails.
    pub fn open(path: &Path, name: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, name)
    }

    /// Bind an existing connection (e.g. in-memory SQLite) to collection `name`.
    pub fn with_connection(conn: Connection, name: &str) -> Result<Self> {
        create_schema(&conn)?;
        Ok(Self {
            conn,
            name: name.to_string(),
        })
    }

    fn get_one(&self, id: &str) -> Result<Option<Record>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, document, embedding, metadata
            FROM records
            WHERE collection = ?1 AND id = ?2
            "#,
        )?;

        let raw = stmt
            .query_row(params![&self.name, id], record_from_row)
            .optional()?;

        raw.map(decode).transpose()
    }

    /// Dimension of the vectors already stored, `None` for an empty collection.
    fn stored_dimension(&self) -> Result<Option<usize>> {
        let bytes: Option<i64> = self
            .conn
            .query_row(
                "SELECT length(embedding) FROM records WHERE collection = ?1 LIMIT 1",
                [&self.name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(bytes.map(|b| b as usize / 4))
    }
}

impl VectorCollection for SqliteCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM records WHERE collection = ?1 AND id = ?2",
                params![&self.name, id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&mut self, record: Record) -> Result<()> {
        validate_vector(&record.vector, self.stored_dimension()?)?;
        let blob = vec_to_blob(&record.vector)?;
        let metadata = serde_json::to_string(&record.metadata)?;

        let inserted = self.conn.execute(
            r#"
            INSERT INTO records (collection, id, document, embedding, metadata)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![&self.name, &record.id, &record.document, &blob, &metadata],
        );

        match inserted {
            Ok(_) => {
                debug!(collection = %self.name, id = %record.id, "record inserted");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(Error::DuplicateId {
                    collection: self.name.clone(),
                    id: record.id,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_all(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, document, embedding, metadata
            FROM records
            WHERE collection = ?1
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([&self.name], record_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(decode(row?)?);
        }
        Ok(records)
    }

    fn get(&self, ids: &[String]) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get_one(id)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredRecord>> {
        validate_limit(top_k)?;

        let mut scored = Vec::new();
        for record in self.get_all()? {
            let similarity = cosine_similarity(vector, &record.vector)?;
            scored.push(ScoredRecord { record, similarity });
        }

        Ok(rank(scored, top_k))
    }

    fn delete(&mut self, ids: &[String]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        let mut removed = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM records WHERE collection = ?1 AND id = ?2")?;
            for id in ids {
                removed += stmt.execute(params![&self.name, id])?;
            }
        }
        tx.commit()?;

        debug!(collection = %self.name, removed, "records deleted");
        Ok(removed)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE collection = ?1",
            [&self.name],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
