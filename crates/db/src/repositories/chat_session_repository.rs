use campus_core::ChatSession;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::ChatSessionRow;

const SELECT_COLUMNS: &str = "id, student_id, module_id, chapter_id, bibliography_item_id, kind, \
                              status, ai_question_asked, ai_question_answered, started_at, \
                              ended_at, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct ChatSessionRepository {
    pool: SqlitePool,
}

impl ChatSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a session inside an open transaction. Sessions are only
    /// ever created together with their first message.
    pub async fn insert_in_tx(
        &self,
        conn: &mut SqliteConnection,
        session: &ChatSession,
    ) -> Result<(), DbError> {
        let row = ChatSessionRow::from(session);

        sqlx::query(
            r#"
            INSERT INTO chat_sessions
                (id, student_id, module_id, chapter_id, bibliography_item_id, kind, status,
                 ai_question_asked, ai_question_answered, started_at, ended_at,
                 created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.student_id)
        .bind(&row.module_id)
        .bind(&row.chapter_id)
        .bind(&row.bibliography_item_id)
        .bind(&row.kind)
        .bind(&row.status)
        .bind(row.ai_question_asked)
        .bind(row.ai_question_answered)
        .bind(row.started_at)
        .bind(row.ended_at)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM chat_sessions WHERE id = ? AND deleted_at IS NULL"
        );
        let row: Option<ChatSessionRow> = sqlx::query_as(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    /// A student's sessions, newest first.
    pub async fn find_by_student(&self, student_id: Uuid) -> Result<Vec<ChatSession>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM chat_sessions \
             WHERE student_id = ? AND deleted_at IS NULL \
             ORDER BY created_at DESC, rowid DESC"
        );
        let rows: Vec<ChatSessionRow> = sqlx::query_as(&query)
            .bind(student_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Flip the one-way answered flag inside an open transaction.
    pub async fn set_question_answered_in_tx(
        &self,
        conn: &mut SqliteConnection,
        session_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DbError> {
        sqlx::query(
            "UPDATE chat_sessions SET ai_question_answered = 1, updated_at = ? WHERE id = ?",
        )
        .bind(updated_at.timestamp())
        .bind(session_id.to_string())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Persist a status transition already applied to the domain value.
    pub async fn update_status(&self, session: &ChatSession) -> Result<(), DbError> {
        let row = ChatSessionRow::from(session);

        sqlx::query("UPDATE chat_sessions SET status = ?, ended_at = ?, updated_at = ? WHERE id = ?")
            .bind(&row.status)
            .bind(row.ended_at)
            .bind(row.updated_at)
            .bind(&row.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
