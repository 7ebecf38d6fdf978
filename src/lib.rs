pub mod config;
pub mod db;
pub mod models;
pub mod rag;

pub use models::{EmbeddingRecord, NewEmbedding};
pub use rag::orchestrator::{RetrievalStrategy, RetrievedContext, Retriever};
pub use rag::store::{InMemoryStore, SqliteStore};
pub use rag::types::{EmbeddingStore, RetrievalParams, RetrievalQuery, ScoredCandidate};
pub use rag::RetrievalError;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedding hosts that do not set up their own
/// subscriber. Call once at startup; honors RUST_LOG when present.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} retrieval core v{}", config::APP_NAME, config::APP_VERSION);
}
