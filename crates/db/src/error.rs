use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),

    #[error("Storage identifier already registered: {0}")]
    DuplicateStorageIdentifier(String),
}

impl DbError {
    /// Whether this error is a storage-level uniqueness violation. Batch
    /// code treats this as the authoritative duplicate signal.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}
