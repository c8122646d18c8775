use campus_core::Tenant;
use uuid::Uuid;

use super::{datetime_to_timestamp, timestamp_to_datetime};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TenantRow {
    pub id: String,
    pub name: String,
    pub storage_identifier: String,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TenantRow {
    pub fn into_domain(self) -> Tenant {
        Tenant {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            name: self.name,
            storage_identifier: self.storage_identifier,
            active: self.active,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

impl From<&Tenant> for TenantRow {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name.clone(),
            storage_identifier: tenant.storage_identifier.clone(),
            active: tenant.active,
            created_at: datetime_to_timestamp(tenant.created_at),
            updated_at: datetime_to_timestamp(tenant.updated_at),
        }
    }
}
