//! Database-specific error types and conversions.

use tre_core::error::TreError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for TreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TreError::EntityDoesNotExist { entity, id },
            other => TreError::Database(other.to_string()),
        }
    }
}
