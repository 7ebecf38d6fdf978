use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RetrievalError;
use crate::config;
use crate::db::repository::get_rag_config;
use crate::db::DatabaseError;
use crate::models::{EmbeddingRecord, NewEmbedding};

/// A candidate passage with its similarity score against one query.
/// Ephemeral — produced per query, discarded after response assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub record: EmbeddingRecord,
    /// Cosine similarity in [-1, 1]; exactly 0 for degenerate pairs.
    pub score: f32,
}

/// A patient's query as the chat layer hands it to retrieval: the raw text
/// plus, when the embedding path is available, a precomputed query vector.
#[derive(Debug, Clone)]
pub struct RetrievalQuery {
    pub text: String,
    pub embedding: Option<Vec<f32>>,
}

impl RetrievalQuery {
    pub fn lexical(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            embedding: None,
        }
    }

    pub fn semantic(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            embedding: Some(embedding),
        }
    }
}

/// Retrieval tuning parameters, with deployment overrides from `rag_config`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalParams {
    /// Maximum ranked matches returned per query. Zero yields no matches.
    pub top_k: usize,
    /// Minimum similarity to qualify. Applied literally even outside [-1, 1].
    pub threshold: f32,
    /// Result cap for the lexical fallback matcher.
    pub lexical_limit: usize,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            top_k: config::DEFAULT_TOP_K,
            threshold: config::DEFAULT_SIMILARITY_THRESHOLD,
            lexical_limit: config::DEFAULT_LEXICAL_LIMIT,
        }
    }
}

impl RetrievalParams {
    /// Load parameters, applying any overrides stored in `rag_config`.
    ///
    /// An unparseable stored value falls back to the built-in default
    /// rather than failing retrieval; only storage faults propagate.
    pub fn load(conn: &Connection) -> Result<Self, DatabaseError> {
        let mut params = Self::default();

        if let Some(raw) = get_rag_config(conn, config::CONFIG_KEY_TOP_K)? {
            match raw.parse() {
                Ok(v) => params.top_k = v,
                Err(_) => tracing::warn!(value = %raw, "Ignoring unparseable top_k override"),
            }
        }
        if let Some(raw) = get_rag_config(conn, config::CONFIG_KEY_THRESHOLD)? {
            match raw.parse() {
                Ok(v) => params.threshold = v,
                Err(_) => tracing::warn!(value = %raw, "Ignoring unparseable threshold override"),
            }
        }
        if let Some(raw) = get_rag_config(conn, config::CONFIG_KEY_LEXICAL_LIMIT)? {
            match raw.parse() {
                Ok(v) => params.lexical_limit = v,
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring unparseable lexical_limit override")
                }
            }
        }

        Ok(params)
    }
}

/// Durable storage abstraction over the embedding corpus.
///
/// The ranker and matcher take candidate snapshots, not this trait, so they
/// stay pure; the orchestrator decides the consistency window by choosing
/// when to enumerate. `InMemoryStore` backs tests without a database.
pub trait EmbeddingStore {
    fn insert(&self, new: &NewEmbedding) -> Result<Uuid, RetrievalError>;

    /// Insert each record independently, in order. No cross-record
    /// transaction: a concurrent reader may observe a partial batch.
    fn insert_batch(&self, batch: &[NewEmbedding]) -> Result<Vec<Uuid>, RetrievalError>;

    /// Idempotent: deleting an absent id is a no-op, not an error.
    fn delete_by_id(&self, id: &Uuid) -> Result<(), RetrievalError>;

    /// Remove every record; returns how many were removed.
    fn clear_all(&self) -> Result<usize, RetrievalError>;

    fn list_all(&self) -> Result<Vec<EmbeddingRecord>, RetrievalError>;

    fn list_by_source(&self, source: &str) -> Result<Vec<EmbeddingRecord>, RetrievalError>;

    fn count(&self) -> Result<usize, RetrievalError>;
}
