use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campus_core::{Role, Tenant};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct RegisterTenantRequest {
    pub name: String,
    pub storage_identifier: String,
}

fn require_operator(caller: &CallerIdentity) -> Result<(), AppError> {
    if caller.identity.role != Role::Operator {
        return Err(AppError::Forbidden(
            "tenant administration requires the operator role".to_string(),
        ));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/tenants",
    request_body = RegisterTenantRequest,
    responses(
        (status = 201, description = "Tenant registered", body = Tenant),
        (status = 403, description = "Caller is not an operator"),
        (status = 409, description = "Storage identifier already registered")
    ),
    tag = "tenants"
)]
pub async fn register_tenant(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<RegisterTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), AppError> {
    require_operator(&caller)?;

    let tenant = Tenant::new(request.name, request.storage_identifier);
    state.resolver.registry().register(&tenant).await?;

    Ok((StatusCode::CREATED, Json(tenant)))
}

#[utoipa::path(
    get,
    path = "/api/tenants",
    responses(
        (status = 200, description = "All registered tenants", body = Vec<Tenant>),
        (status = 403, description = "Caller is not an operator")
    ),
    tag = "tenants"
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Vec<Tenant>>, AppError> {
    require_operator(&caller)?;
    Ok(Json(state.resolver.registry().list().await?))
}
