//! Database-specific error types and conversions.

use tenantry_core::error::TenantryError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Commit failed: {0}")]
    Commit(String),

    /// A create-only key already existed, or a concurrent transaction
    /// wrote the same keys first.
    #[error("Conflicting write: {0}")]
    Conflict(String),

    #[error("write attempted on a read-only transaction")]
    ReadOnly,
}

impl From<DbError> for TenantryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict(msg) => TenantryError::WriteConflict(msg),
            other => TenantryError::Store(other.to_string()),
        }
    }
}
