use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::{Identity, Role};
use uuid::Uuid;

use crate::error::AppError;

/// Caller identity taken from trusted headers. Authentication happens
/// upstream; this layer only reads the result.
///
/// - `x-caller-id`: the caller's user id (required)
/// - `x-role`: operator | professor | student (required)
/// - `x-tenant-id`: the caller's home tenant (required for tenant-bound
///   roles, absent for operators)
/// - `x-target-tenant`: the tenant an operator is acting on
pub struct CallerIdentity {
    pub identity: Identity,
    pub target_tenant: Option<Uuid>,
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller_id = required_uuid(parts, "x-caller-id")?;

        let role_raw = header_str(parts, "x-role")?
            .ok_or_else(|| AppError::BadRequest("missing x-role header".to_string()))?;
        let role = Role::parse(role_raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown role: {role_raw}")))?;

        let tenant_id = optional_uuid(parts, "x-tenant-id")?;
        let target_tenant = optional_uuid(parts, "x-target-tenant")?;

        Ok(CallerIdentity {
            identity: Identity::new(caller_id, role, tenant_id),
            target_tenant,
        })
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, AppError> {
    match parts.headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid {name} header"))),
    }
}

fn required_uuid(parts: &Parts, name: &str) -> Result<Uuid, AppError> {
    optional_uuid(parts, name)?
        .ok_or_else(|| AppError::BadRequest(format!("missing {name} header")))
}

fn optional_uuid(parts: &Parts, name: &str) -> Result<Option<Uuid>, AppError> {
    match header_str(parts, name)? {
        None => Ok(None),
        Some(raw) => Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid {name} header"))),
    }
}
