use serde::{Deserialize, Serialize};

use super::lexical::search_by_content;
use super::ranker::rank;
use super::types::{EmbeddingStore, RetrievalParams, RetrievalQuery, ScoredCandidate};
use super::RetrievalError;
use crate::models::EmbeddingRecord;

/// Which retrieval path produced the matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalStrategy {
    Semantic,
    Lexical,
}

/// Matched context for one query, ready for prompt grounding and citation.
#[derive(Debug, Clone)]
pub struct RetrievedContext {
    pub semantic_matches: Vec<ScoredCandidate>,
    pub lexical_matches: Vec<EmbeddingRecord>,
    pub strategy: RetrievalStrategy,
}

impl RetrievedContext {
    /// An empty context is a valid outcome; the chat layer answers from
    /// its template response instead of surfacing an error.
    pub fn is_empty(&self) -> bool {
        self.semantic_matches.is_empty() && self.lexical_matches.is_empty()
    }

    /// Matched passage texts, best first.
    pub fn contents(&self) -> Vec<&str> {
        match self.strategy {
            RetrievalStrategy::Semantic => self
                .semantic_matches
                .iter()
                .map(|c| c.record.content.as_str())
                .collect(),
            RetrievalStrategy::Lexical => self
                .lexical_matches
                .iter()
                .map(|r| r.content.as_str())
                .collect(),
        }
    }

    /// Distinct source documents for message citation, in first-seen match
    /// order so repeated identical queries cite identically.
    pub fn sources(&self) -> Vec<String> {
        let records: Vec<&EmbeddingRecord> = match self.strategy {
            RetrievalStrategy::Semantic => {
                self.semantic_matches.iter().map(|c| &c.record).collect()
            }
            RetrievalStrategy::Lexical => self.lexical_matches.iter().collect(),
        };

        let mut sources = Vec::new();
        for record in records {
            if let Some(source) = &record.source {
                if !sources.contains(source) {
                    sources.push(source.clone());
                }
            }
        }
        sources
    }
}

/// Two-step retrieval over an embedding store.
///
/// Attempts the semantic path when the query carries a vector; falls back to
/// the lexical matcher when it does not, or when no candidate clears the
/// threshold. The fallback branch lives here, not inside the ranker — the
/// two algorithms have different guarantees and must not be conflated.
pub struct Retriever<'a, S: EmbeddingStore> {
    store: &'a S,
    params: RetrievalParams,
}

impl<'a, S: EmbeddingStore> Retriever<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            params: RetrievalParams::default(),
        }
    }

    pub fn with_params(store: &'a S, params: RetrievalParams) -> Self {
        Self { store, params }
    }

    /// Retrieve grounding context for one patient query.
    ///
    /// Enumerates the corpus once; both paths work over that snapshot, so
    /// a record inserted mid-call will not appear until the next query.
    /// Storage faults propagate unmodified — never downgraded to an empty
    /// context, which would silently hide data loss.
    pub fn retrieve(&self, query: &RetrievalQuery) -> Result<RetrievedContext, RetrievalError> {
        let snapshot = self.store.list_all()?;

        if let Some(vector) = &query.embedding {
            let ranked = rank(vector, &snapshot, self.params.top_k, self.params.threshold);
            if !ranked.is_empty() {
                tracing::debug!(matches = ranked.len(), "Semantic retrieval succeeded");
                return Ok(RetrievedContext {
                    semantic_matches: ranked,
                    lexical_matches: Vec::new(),
                    strategy: RetrievalStrategy::Semantic,
                });
            }
            tracing::debug!("No candidate cleared the threshold, trying lexical fallback");
        }

        let matched = search_by_content(&snapshot, &query.text, self.params.lexical_limit);
        tracing::debug!(matches = matched.len(), "Lexical retrieval");
        Ok(RetrievedContext {
            semantic_matches: Vec::new(),
            lexical_matches: matched,
            strategy: RetrievalStrategy::Lexical,
        })
    }
}
