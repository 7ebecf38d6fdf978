use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{EmbeddingRecord, NewEmbedding};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert one embedding record. Assigns id and creation timestamp.
///
/// An empty embedding is rejected outright — storing a zero-length vector
/// would poison every later similarity pass over the corpus.
pub fn insert_embedding(conn: &Connection, new: &NewEmbedding) -> Result<Uuid, DatabaseError> {
    if new.embedding.is_empty() {
        return Err(DatabaseError::EmptyEmbedding);
    }

    let id = Uuid::new_v4();
    let created_at = chrono::Local::now().naive_local();
    let metadata_json = match &new.metadata {
        Some(value) => Some(serde_json::to_string(value).map_err(|e| {
            DatabaseError::ConstraintViolation(format!("Metadata is not serializable: {e}"))
        })?),
        None => None,
    };

    conn.execute(
        "INSERT INTO embeddings (id, content, embedding, source, metadata, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id.to_string(),
            new.content,
            encode_embedding(&new.embedding),
            new.source,
            metadata_json,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;

    Ok(id)
}

/// Insert a batch of embedding records in the given order.
///
/// Each row is its own durable unit — no cross-record transaction. A failure
/// mid-batch leaves the earlier rows in place and propagates the error.
pub fn insert_embeddings(
    conn: &Connection,
    batch: &[NewEmbedding],
) -> Result<Vec<Uuid>, DatabaseError> {
    let mut ids = Vec::with_capacity(batch.len());
    for new in batch {
        ids.push(insert_embedding(conn, new)?);
    }
    Ok(ids)
}

/// Delete one embedding record. Idempotent: a missing id is a no-op.
pub fn delete_embedding(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM embeddings WHERE id = ?1",
        params![id.to_string()],
    )?;
    if deleted == 0 {
        tracing::debug!(embedding_id = %id, "Delete of absent embedding, ignoring");
    }
    Ok(())
}

/// Delete every embedding record and return how many were removed.
pub fn clear_embeddings(conn: &Connection) -> Result<usize, DatabaseError> {
    let deleted = conn.execute("DELETE FROM embeddings", [])?;
    tracing::info!(deleted, "Cleared embedding corpus");
    Ok(deleted)
}

/// List every embedding record in insertion order (stable within a read).
///
/// `created_at` has one-second resolution, so ordering keys on rowid,
/// which SQLite assigns monotonically on insert.
pub fn list_embeddings(conn: &Connection) -> Result<Vec<EmbeddingRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, content, embedding, source, metadata, created_at
         FROM embeddings ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map([], row_to_embedding_row)?;
    collect_records(rows)
}

/// List embedding records from one source document (indexed lookup),
/// in insertion order.
pub fn list_embeddings_by_source(
    conn: &Connection,
    source: &str,
) -> Result<Vec<EmbeddingRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, content, embedding, source, metadata, created_at
         FROM embeddings WHERE source = ?1 ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map(params![source], row_to_embedding_row)?;
    collect_records(rows)
}

/// Total number of embedding records.
pub fn count_embeddings(conn: &Connection) -> Result<usize, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM embeddings", [], |row| row.get(0))?;
    Ok(count as usize)
}

// Internal row type for EmbeddingRecord mapping
struct EmbeddingRow {
    id: String,
    content: String,
    embedding: Vec<u8>,
    source: Option<String>,
    metadata: Option<String>,
    created_at: String,
}

fn row_to_embedding_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EmbeddingRow> {
    Ok(EmbeddingRow {
        id: row.get(0)?,
        content: row.get(1)?,
        embedding: row.get(2)?,
        source: row.get(3)?,
        metadata: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn collect_records(
    rows: impl Iterator<Item = rusqlite::Result<EmbeddingRow>>,
) -> Result<Vec<EmbeddingRecord>, DatabaseError> {
    let mut records = Vec::new();
    for row in rows {
        records.push(embedding_from_row(row?)?);
    }
    Ok(records)
}

fn embedding_from_row(row: EmbeddingRow) -> Result<EmbeddingRecord, DatabaseError> {
    let metadata = match row.metadata {
        Some(json) => serde_json::from_str(&json).ok(),
        None => None,
    };

    // Same corruption policy as the blob: surface it, never coerce. A nil
    // id from a silent default would make the record undeletable.
    let id = Uuid::parse_str(&row.id).map_err(|e| DatabaseError::CorruptRecord {
        reason: format!("invalid id {:?}: {e}", row.id),
    })?;
    let created_at = NaiveDateTime::parse_from_str(&row.created_at, TIMESTAMP_FORMAT)
        .map_err(|e| DatabaseError::CorruptRecord {
            reason: format!("invalid created_at {:?}: {e}", row.created_at),
        })?;

    Ok(EmbeddingRecord {
        id,
        content: row.content,
        embedding: decode_embedding(&row.embedding)?,
        source: row.source,
        metadata,
        created_at,
    })
}

/// Encode a vector as a little-endian f32 blob.
fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decode a little-endian f32 blob back into a vector.
fn decode_embedding(blob: &[u8]) -> Result<Vec<f32>, DatabaseError> {
    if blob.len() % 4 != 0 {
        return Err(DatabaseError::CorruptEmbedding {
            reason: format!("blob length {} is not a multiple of 4", blob.len()),
        });
    }

    let mut vector = Vec::with_capacity(blob.len() / 4);
    for chunk in blob.chunks_exact(4) {
        vector.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(vector)
}
