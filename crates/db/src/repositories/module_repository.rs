use campus_core::Module;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::ModuleRow;

#[derive(Clone)]
pub struct ModuleRepository {
    pool: SqlitePool,
}

impl ModuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, module: &Module) -> Result<(), DbError> {
        let row = ModuleRow::from(module);

        sqlx::query(
            r#"
            INSERT INTO modules (id, title, published, created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(row.published)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_live(&self, id: Uuid) -> Result<Option<Module>, DbError> {
        let row: Option<ModuleRow> = sqlx::query_as(
            r#"
            SELECT id, title, published, created_at, updated_at, deleted_at
            FROM modules
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_domain()))
    }
}
