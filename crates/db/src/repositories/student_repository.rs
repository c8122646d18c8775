use campus_core::Student;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::StudentRow;

#[derive(Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, student: &Student) -> Result<(), DbError> {
        let row = StudentRow::from(student);

        sqlx::query(
            r#"
            INSERT INTO students (id, display_name, email, created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.display_name)
        .bind(&row.email)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_live(&self, id: Uuid) -> Result<Option<Student>, DbError> {
        let row: Option<StudentRow> = sqlx::query_as(
            r#"
            SELECT id, display_name, email, created_at, updated_at, deleted_at
            FROM students
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbError> {
        let now = Utc::now().timestamp();
        let result = sqlx::query(
            "UPDATE students SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
