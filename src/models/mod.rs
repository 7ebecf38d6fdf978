use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One retrievable knowledge-base passage with its embedding.
///
/// Records are immutable once stored; corpus maintenance is insert/delete
/// only. `embedding` length is a deployment-time invariant — the ranker
/// treats mismatched lengths as non-comparable rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub id: Uuid,
    pub content: String,
    pub embedding: Vec<f32>,
    /// Provenance (e.g., source document name), surfaced as a citation.
    pub source: Option<String>,
    /// Opaque caller-defined payload, never inspected by the ranker.
    pub metadata: Option<serde_json::Value>,
    pub created_at: NaiveDateTime,
}

/// Insert payload for a knowledge-base passage. The store assigns id
/// and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmbedding {
    pub content: String,
    pub embedding: Vec<f32>,
    pub source: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl NewEmbedding {
    pub fn new(content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            content: content.into(),
            embedding,
            source: None,
            metadata: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
