use axum::extract::{Path, State};
use axum::Json;
use campus_core::{BatchOptions, BatchReport, Enrollment, EnrollmentKind, EnrollmentSubject};
use orchestrator::EnrollmentService;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct BatchEnrollRequest {
    pub student_id: Uuid,
    pub module_ids: Vec<Uuid>,
    #[serde(default)]
    pub kind: EnrollmentKind,
    #[serde(default)]
    pub options: BatchOptions,
}

#[derive(Deserialize, ToSchema)]
pub struct BatchEnrollStudentsRequest {
    pub student_ids: Vec<Uuid>,
    pub module_ids: Vec<Uuid>,
    #[serde(default)]
    pub kind: EnrollmentKind,
    #[serde(default)]
    pub options: BatchOptions,
}

fn service(state: &AppState, handle: db::TenantStorageHandle) -> EnrollmentService {
    EnrollmentService::new(handle, state.bus.clone())
}

#[utoipa::path(
    post,
    path = "/api/enrollments/batch",
    request_body = BatchEnrollRequest,
    responses(
        (status = 200, description = "Per-item results; partial failure is a normal outcome",
         body = BatchReport<EnrollmentSubject>),
        (status = 400, description = "Empty batch"),
        (status = 404, description = "Tenant not found")
    ),
    tag = "enrollments"
)]
pub async fn batch_enroll(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<BatchEnrollRequest>,
) -> Result<Json<BatchReport<EnrollmentSubject>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let report = service(&state, handle)
        .enroll_student(
            request.student_id,
            request.module_ids,
            request.kind,
            request.options,
        )
        .await?;

    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/batch-students",
    request_body = BatchEnrollStudentsRequest,
    responses(
        (status = 200, description = "Per-item results across all students",
         body = BatchReport<EnrollmentSubject>),
        (status = 400, description = "Empty batch"),
        (status = 404, description = "Tenant not found")
    ),
    tag = "enrollments"
)]
pub async fn batch_enroll_students(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<BatchEnrollStudentsRequest>,
) -> Result<Json<BatchReport<EnrollmentSubject>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    let report = service(&state, handle)
        .enroll_students(
            request.student_ids,
            request.module_ids,
            request.kind,
            request.options,
        )
        .await?;

    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/{id}/withdraw",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment withdrawn", body = Enrollment),
        (status = 404, description = "Enrollment not found"),
        (status = 409, description = "Enrollment is not active")
    ),
    tag = "enrollments"
)]
pub async fn withdraw_enrollment(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(service(&state, handle).withdraw(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/enrollments/{id}/complete",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment completed", body = Enrollment),
        (status = 404, description = "Enrollment not found"),
        (status = 409, description = "Enrollment is not active")
    ),
    tag = "enrollments"
)]
pub async fn complete_enrollment(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(service(&state, handle).complete(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/batches/{batch_id}",
    params(("batch_id" = Uuid, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Enrollments the batch created", body = Vec<Enrollment>)
    ),
    tag = "enrollments"
)]
pub async fn list_batch_enrollments(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let handle = state
        .handle_for(&caller.identity, caller.target_tenant)
        .await?;

    Ok(Json(service(&state, handle).find_by_batch(batch_id).await?))
}
