pub mod sqlite;
pub mod repository;

pub use sqlite::*;
pub use repository::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Embedding must not be empty")]
    EmptyEmbedding,

    #[error("Corrupt embedding blob: {reason}")]
    CorruptEmbedding { reason: String },

    #[error("Corrupt stored record: {reason}")]
    CorruptRecord { reason: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}
