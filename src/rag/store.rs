use std::sync::Mutex;

use rusqlite::Connection;
use uuid::Uuid;

use super::types::EmbeddingStore;
use super::RetrievalError;
use crate::db::repository;
use crate::models::{EmbeddingRecord, NewEmbedding};

/// SQLite-backed embedding corpus. The production store.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EmbeddingStore for SqliteStore<'_> {
    fn insert(&self, new: &NewEmbedding) -> Result<Uuid, RetrievalError> {
        Ok(repository::insert_embedding(self.conn, new)?)
    }

    fn insert_batch(&self, batch: &[NewEmbedding]) -> Result<Vec<Uuid>, RetrievalError> {
        Ok(repository::insert_embeddings(self.conn, batch)?)
    }

    fn delete_by_id(&self, id: &Uuid) -> Result<(), RetrievalError> {
        Ok(repository::delete_embedding(self.conn, id)?)
    }

    fn clear_all(&self) -> Result<usize, RetrievalError> {
        Ok(repository::clear_embeddings(self.conn)?)
    }

    fn list_all(&self) -> Result<Vec<EmbeddingRecord>, RetrievalError> {
        Ok(repository::list_embeddings(self.conn)?)
    }

    fn list_by_source(&self, source: &str) -> Result<Vec<EmbeddingRecord>, RetrievalError> {
        Ok(repository::list_embeddings_by_source(self.conn, source)?)
    }

    fn count(&self) -> Result<usize, RetrievalError> {
        Ok(repository::count_embeddings(self.conn)?)
    }
}

/// In-memory embedding corpus for tests and ephemeral sessions.
/// Same contract as `SqliteStore`, insertion order preserved.
pub struct InMemoryStore {
    entries: Mutex<Vec<EmbeddingRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingStore for InMemoryStore {
    fn insert(&self, new: &NewEmbedding) -> Result<Uuid, RetrievalError> {
        if new.embedding.is_empty() {
            return Err(RetrievalError::Database(
                crate::db::DatabaseError::EmptyEmbedding,
            ));
        }

        let id = Uuid::new_v4();
        let mut entries = self.entries.lock().unwrap();
        entries.push(EmbeddingRecord {
            id,
            content: new.content.clone(),
            embedding: new.embedding.clone(),
            source: new.source.clone(),
            metadata: new.metadata.clone(),
            created_at: chrono::Local::now().naive_local(),
        });
        Ok(id)
    }

    fn insert_batch(&self, batch: &[NewEmbedding]) -> Result<Vec<Uuid>, RetrievalError> {
        let mut ids = Vec::with_capacity(batch.len());
        for new in batch {
            ids.push(self.insert(new)?);
        }
        Ok(ids)
    }

    fn delete_by_id(&self, id: &Uuid) -> Result<(), RetrievalError> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| e.id != *id);
        Ok(())
    }

    fn clear_all(&self) -> Result<usize, RetrievalError> {
        let mut entries = self.entries.lock().unwrap();
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    fn list_all(&self) -> Result<Vec<EmbeddingRecord>, RetrievalError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn list_by_source(&self, source: &str) -> Result<Vec<EmbeddingRecord>, RetrievalError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.source.as_deref() == Some(source))
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize, RetrievalError> {
        Ok(self.entries.lock().unwrap().len())
    }
}
