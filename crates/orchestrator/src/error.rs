use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Reorder request spans more than one chapter")]
    CrossScopeReorder,

    #[error("Duplicate target sequence in reorder request")]
    DuplicateSequence,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Batch contains no items")]
    EmptyBatch,

    #[error("Advisory service failed: {0}")]
    ExternalService(#[from] advisor::AdvisorError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(db::DbError),
}

impl From<db::DbError> for OrchestratorError {
    fn from(err: db::DbError) -> Self {
        match err {
            db::DbError::TenantNotFound(id) => OrchestratorError::TenantNotFound(id),
            other => OrchestratorError::Database(other),
        }
    }
}

impl From<campus_core::CoreError> for OrchestratorError {
    fn from(err: campus_core::CoreError) -> Self {
        use campus_core::CoreError;
        match err {
            CoreError::TenantNotFound(id) => OrchestratorError::TenantNotFound(id),
            CoreError::InvalidTransition { .. } => OrchestratorError::InvalidState(err.to_string()),
            CoreError::MissingTenant | CoreError::Validation(_) => {
                OrchestratorError::Validation(err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
