use campus_core::Chapter;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::ChapterRow;

#[derive(Clone)]
pub struct ChapterRepository {
    pool: SqlitePool,
}

impl ChapterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, chapter: &Chapter) -> Result<(), DbError> {
        let row = ChapterRow::from(chapter);

        sqlx::query(
            r#"
            INSERT INTO chapters (id, module_id, title, created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.module_id)
        .bind(&row.title)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_live(&self, id: Uuid) -> Result<Option<Chapter>, DbError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            r#"
            SELECT id, module_id, title, created_at, updated_at, deleted_at
            FROM chapters
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_domain()))
    }
}
