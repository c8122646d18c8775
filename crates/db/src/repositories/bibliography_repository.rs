use campus_core::BibliographyItem;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::BibliographyItemRow;

const SELECT_COLUMNS: &str = "id, chapter_id, title, content, kind, sequence, anchor_question, \
                              created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct BibliographyRepository {
    pool: SqlitePool,
}

impl BibliographyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, item: &BibliographyItem) -> Result<(), DbError> {
        let row = BibliographyItemRow::from(item);

        sqlx::query(
            r#"
            INSERT INTO bibliography_items
                (id, chapter_id, title, content, kind, sequence, anchor_question,
                 created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.chapter_id)
        .bind(&row.title)
        .bind(&row.content)
        .bind(&row.kind)
        .bind(row.sequence)
        .bind(&row.anchor_question)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_live(&self, id: Uuid) -> Result<Option<BibliographyItem>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM bibliography_items WHERE id = ? AND deleted_at IS NULL"
        );
        let row: Option<BibliographyItemRow> = sqlx::query_as(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    /// Live items of one chapter in display order.
    pub async fn list_live_by_chapter(
        &self,
        chapter_id: Uuid,
    ) -> Result<Vec<BibliographyItem>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM bibliography_items \
             WHERE chapter_id = ? AND deleted_at IS NULL \
             ORDER BY sequence ASC"
        );
        let rows: Vec<BibliographyItemRow> = sqlx::query_as(&query)
            .bind(chapter_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Load a set of live items inside an open transaction.
    pub async fn fetch_live_many(
        &self,
        conn: &mut SqliteConnection,
        ids: &[Uuid],
    ) -> Result<Vec<BibliographyItem>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM bibliography_items \
             WHERE deleted_at IS NULL AND id IN ({placeholders})"
        );

        let mut statement = sqlx::query_as(&query);
        for id in ids {
            statement = statement.bind(id.to_string());
        }
        let rows: Vec<BibliographyItemRow> = statement.fetch_all(&mut *conn).await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Move one item to a sequence slot inside an open transaction.
    pub async fn set_sequence(
        &self,
        conn: &mut SqliteConnection,
        item_id: Uuid,
        sequence: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE bibliography_items SET sequence = ?, updated_at = ? WHERE id = ?")
            .bind(sequence)
            .bind(updated_at.timestamp())
            .bind(item_id.to_string())
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbError> {
        let now = Utc::now().timestamp();
        let result = sqlx::query(
            "UPDATE bibliography_items SET deleted_at = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
