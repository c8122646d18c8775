use campus_core::ChatMessage;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::ChatMessageRow;

const SELECT_COLUMNS: &str =
    "id, session_id, author, content, metadata, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct ChatMessageRepository {
    pool: SqlitePool,
}

impl ChatMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message inside an open transaction. Messages are only
    /// ever written as part of a workflow transaction.
    pub async fn insert_in_tx(
        &self,
        conn: &mut SqliteConnection,
        message: &ChatMessage,
    ) -> Result<(), DbError> {
        let row = ChatMessageRow::from(message);

        sqlx::query(
            r#"
            INSERT INTO chat_messages
                (id, session_id, author, content, metadata, created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.session_id)
        .bind(&row.author)
        .bind(&row.content)
        .bind(&row.metadata)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Messages of one session in arrival order. Timestamps have second
    /// precision, so rowid breaks ties within one transaction.
    pub async fn list_by_session(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM chat_messages \
             WHERE session_id = ? AND deleted_at IS NULL \
             ORDER BY created_at ASC, rowid ASC"
        );
        let rows: Vec<ChatMessageRow> = sqlx::query_as(&query)
            .bind(session_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    pub async fn count_by_session(&self, session_id: Uuid) -> Result<i64, DbError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM chat_messages WHERE session_id = ? AND deleted_at IS NULL",
        )
        .bind(session_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
