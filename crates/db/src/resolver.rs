use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use campus_core::TenantContext;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbError;
use crate::handle::TenantStorageHandle;
use crate::pool::{create_pool, run_tenant_migrations};
use crate::registry::TenantRegistry;

/// Maps a caller's tenant to a storage handle.
///
/// Pools are cached per storage identifier for the life of the process;
/// the map is read-heavy and append-mostly, so a plain RwLock'd map is
/// enough. Two requests racing on an unseen tenant may both build a
/// pool; the loser's pool is dropped and the winner's is cached.
pub struct TenantResolver {
    registry: TenantRegistry,
    data_dir: PathBuf,
    pools: RwLock<HashMap<String, SqlitePool>>,
}

impl TenantResolver {
    pub fn new(registry: TenantRegistry, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            data_dir: data_dir.into(),
            pools: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &TenantRegistry {
        &self.registry
    }

    /// Resolve a tenant id to a scoped storage handle. Fails with
    /// `TenantNotFound` for unknown or deactivated tenants.
    pub async fn resolve(&self, tenant_id: Uuid) -> Result<TenantStorageHandle, DbError> {
        let tenant = self
            .registry
            .find_by_id(tenant_id)
            .await?
            .filter(|t| t.active)
            .ok_or(DbError::TenantNotFound(tenant_id))?;

        let pool = self.pool_for(&tenant.storage_identifier).await?;
        let context = TenantContext {
            tenant_id: tenant.id,
            storage_identifier: tenant.storage_identifier,
        };

        Ok(TenantStorageHandle::new(context, pool))
    }

    async fn pool_for(&self, storage_identifier: &str) -> Result<SqlitePool, DbError> {
        if let Some(pool) = self
            .pools
            .read()
            .expect("tenant pool cache poisoned")
            .get(storage_identifier)
            .cloned()
        {
            return Ok(pool);
        }

        let database_url = format!(
            "sqlite:{}",
            self.data_dir
                .join(format!("{storage_identifier}.db"))
                .display()
        );
        let pool = create_pool(&database_url).await?;
        run_tenant_migrations(&pool).await?;

        let mut pools = self.pools.write().expect("tenant pool cache poisoned");
        if let Some(existing) = pools.get(storage_identifier) {
            // Lost the race; keep the cached pool and drop ours.
            return Ok(existing.clone());
        }
        tracing::info!(storage_identifier, "opened tenant database");
        pools.insert(storage_identifier.to_string(), pool.clone());

        Ok(pool)
    }

    /// Number of tenant databases this process has opened.
    pub fn cached_pools(&self) -> usize {
        self.pools
            .read()
            .expect("tenant pool cache poisoned")
            .len()
    }
}
