//! Repository layer — entity-scoped database operations.

mod embedding;
mod rag_config;

pub use embedding::*;
pub use rag_config::*;
