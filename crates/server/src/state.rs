use std::sync::Arc;

use advisor::AdvisoryService;
use campus_core::Identity;
use db::{TenantResolver, TenantStorageHandle};
use events::NotificationBus;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TenantResolver>,
    pub advisor: Arc<dyn AdvisoryService>,
    pub bus: NotificationBus,
}

impl AppState {
    pub fn new(resolver: TenantResolver, advisor: Arc<dyn AdvisoryService>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            advisor,
            bus: NotificationBus::new(),
        }
    }

    /// Resolve the storage handle a caller's request operates on. The
    /// tenant-selection rules live in the identity itself; resolution
    /// failure means the tenant is unknown or deactivated.
    pub async fn handle_for(
        &self,
        identity: &Identity,
        target_tenant: Option<Uuid>,
    ) -> Result<TenantStorageHandle, AppError> {
        let tenant_id = identity.select_tenant(target_tenant)?;
        Ok(self.resolver.resolve(tenant_id).await?)
    }
}
