use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A registered tenant (one school) in the control-plane registry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    /// Slug naming the tenant's logical database. Unique across tenants.
    pub storage_identifier: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: impl Into<String>, storage_identifier: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            storage_identifier: storage_identifier.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The tenant a request is scoped to. Resolved once per request; every
/// downstream storage access happens through a handle carrying exactly
/// one of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub storage_identifier: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tenant_is_active() {
        let tenant = Tenant::new("Springfield High", "springfield-high");
        assert!(tenant.active);
        assert_eq!(tenant.storage_identifier, "springfield-high");
    }
}
