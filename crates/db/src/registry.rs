use campus_core::Tenant;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::TenantRow;

/// Control-plane directory of tenants. One registry database serves the
/// whole process; it never holds tenant data.
#[derive(Clone)]
pub struct TenantRegistry {
    pool: SqlitePool,
}

impl TenantRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, tenant: &Tenant) -> Result<(), DbError> {
        let row = TenantRow::from(tenant);

        let result = sqlx::query(
            r#"
            INSERT INTO tenants (id, name, storage_identifier, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.storage_identifier)
        .bind(row.active)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let err = DbError::from(err);
                if err.is_unique_violation() {
                    Err(DbError::DuplicateStorageIdentifier(
                        tenant.storage_identifier.clone(),
                    ))
                } else {
                    Err(err)
                }
            }
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, DbError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, storage_identifier, active, created_at, updated_at
            FROM tenants
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, DbError> {
        let rows: Vec<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, storage_identifier, active, created_at, updated_at
            FROM tenants
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Deactivated tenants stay in the registry but no longer resolve.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE tenants SET active = 0, updated_at = ? WHERE id = ?")
            .bind(Utc::now().timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{create_pool, run_registry_migrations};

    async fn setup_registry() -> TenantRegistry {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_registry_migrations(&pool).await.unwrap();
        TenantRegistry::new(pool)
    }

    #[tokio::test]
    async fn test_register_and_find() {
        let registry = setup_registry().await;

        let tenant = Tenant::new("Springfield High", "springfield-high");
        registry.register(&tenant).await.unwrap();

        let found = registry.find_by_id(tenant.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Springfield High");
        assert!(found.active);
    }

    #[tokio::test]
    async fn test_duplicate_storage_identifier_rejected() {
        let registry = setup_registry().await;

        registry
            .register(&Tenant::new("First", "shared-slug"))
            .await
            .unwrap();

        let err = registry
            .register(&Tenant::new("Second", "shared-slug"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateStorageIdentifier(_)));
    }

    #[tokio::test]
    async fn test_deactivate() {
        let registry = setup_registry().await;

        let tenant = Tenant::new("Shelbyville", "shelbyville");
        registry.register(&tenant).await.unwrap();

        assert!(registry.deactivate(tenant.id).await.unwrap());
        let found = registry.find_by_id(tenant.id).await.unwrap().unwrap();
        assert!(!found.active);

        assert!(!registry.deactivate(Uuid::new_v4()).await.unwrap());
    }
}
