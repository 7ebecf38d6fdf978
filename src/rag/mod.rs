pub mod types;
pub mod ranker;
pub mod lexical;
pub mod store;
pub mod orchestrator;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Store backend error: {0}")]
    Backend(String),
}
