use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator, not bound to any tenant.
    Operator,
    Professor,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Professor => "professor",
            Self::Student => "student",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operator" => Some(Self::Operator),
            "professor" => Some(Self::Professor),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// Already-authenticated caller identity, as supplied by the upstream
/// auth layer. `tenant_id` is the caller's home tenant for tenant-bound
/// roles, and absent for operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub caller_id: Uuid,
    pub role: Role,
    pub tenant_id: Option<Uuid>,
}

impl Identity {
    pub fn new(caller_id: Uuid, role: Role, tenant_id: Option<Uuid>) -> Self {
        Self {
            caller_id,
            role,
            tenant_id,
        }
    }

    /// Decide which tenant this request operates on.
    ///
    /// Operators must name the target tenant explicitly; tenant-bound
    /// roles always act on their own tenant and may not name another.
    pub fn select_tenant(&self, requested: Option<Uuid>) -> Result<Uuid, CoreError> {
        match self.role {
            Role::Operator => requested.ok_or(CoreError::MissingTenant),
            Role::Professor | Role::Student => {
                let own = self.tenant_id.ok_or(CoreError::MissingTenant)?;
                match requested {
                    Some(other) if other != own => Err(CoreError::Validation(format!(
                        "caller is bound to tenant {} and cannot act on {}",
                        own, other
                    ))),
                    _ => Ok(own),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_must_name_tenant() {
        let identity = Identity::new(Uuid::new_v4(), Role::Operator, None);

        assert!(matches!(
            identity.select_tenant(None),
            Err(CoreError::MissingTenant)
        ));

        let target = Uuid::new_v4();
        assert_eq!(identity.select_tenant(Some(target)).unwrap(), target);
    }

    #[test]
    fn test_tenant_bound_role_uses_own_tenant() {
        let own = Uuid::new_v4();
        let identity = Identity::new(Uuid::new_v4(), Role::Student, Some(own));

        assert_eq!(identity.select_tenant(None).unwrap(), own);
        assert_eq!(identity.select_tenant(Some(own)).unwrap(), own);
    }

    #[test]
    fn test_tenant_bound_role_cannot_cross_tenants() {
        let identity = Identity::new(Uuid::new_v4(), Role::Professor, Some(Uuid::new_v4()));

        let result = identity.select_tenant(Some(Uuid::new_v4()));
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse("operator"), Some(Role::Operator));
        assert_eq!(Role::Professor.as_str(), "professor");
        assert_eq!(Role::parse("admin"), None);
    }
}
