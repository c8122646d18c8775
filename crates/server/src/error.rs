use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Core(campus_core::CoreError),
    Database(db::DbError),
    Orchestrator(OrchestratorError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            AppError::Core(err) => (StatusCode::BAD_REQUEST, "bad_request", err.to_string()),
            AppError::Database(err) => {
                let message = err.to_string();
                match err {
                    db::DbError::TenantNotFound(_) => (StatusCode::NOT_FOUND, "not_found", message),
                    db::DbError::DuplicateStorageIdentifier(_) => {
                        (StatusCode::CONFLICT, "conflict", message)
                    }
                    _ => {
                        tracing::error!("Database error: {:?}", err);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "database_error",
                            "Database error occurred".to_string(),
                        )
                    }
                }
            }
            AppError::Orchestrator(err) => {
                let message = err.to_string();
                match err {
                    OrchestratorError::TenantNotFound(_) | OrchestratorError::NotFound(_) => {
                        (StatusCode::NOT_FOUND, "not_found", message)
                    }
                    OrchestratorError::DuplicateSequence
                    | OrchestratorError::EmptyBatch
                    | OrchestratorError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "bad_request", message)
                    }
                    OrchestratorError::CrossScopeReorder | OrchestratorError::InvalidState(_) => {
                        (StatusCode::CONFLICT, "conflict", message)
                    }
                    OrchestratorError::ExternalService(_) => {
                        tracing::error!("Advisory service failure: {}", message);
                        (StatusCode::BAD_GATEWAY, "external_service_error", message)
                    }
                    OrchestratorError::Database(inner) => {
                        tracing::error!("Database error: {:?}", inner);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "database_error",
                            "Database error occurred".to_string(),
                        )
                    }
                }
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<campus_core::CoreError> for AppError {
    fn from(err: campus_core::CoreError) -> Self {
        AppError::Core(err)
    }
}

impl From<db::DbError> for AppError {
    fn from(err: db::DbError) -> Self {
        AppError::Database(err)
    }
}

impl From<OrchestratorError> for AppError {
    fn from(err: OrchestratorError) -> Self {
        AppError::Orchestrator(err)
    }
}
