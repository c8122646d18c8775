use campus_core::Enrollment;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::EnrollmentRow;

const SELECT_COLUMNS: &str = "id, student_id, module_id, status, kind, batch_id, enrolled_at, \
                              withdrawn_at, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct EnrollmentRepository {
    pool: SqlitePool,
}

impl EnrollmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new enrollment. The partial unique index on live
    /// (student_id, module_id) pairs makes a concurrent duplicate surface
    /// as a unique violation here; callers check
    /// [`DbError::is_unique_violation`] and treat it as the duplicate
    /// signal rather than an error.
    pub async fn insert(&self, enrollment: &Enrollment) -> Result<(), DbError> {
        let row = EnrollmentRow::from(enrollment);

        sqlx::query(
            r#"
            INSERT INTO enrollments
                (id, student_id, module_id, status, kind, batch_id, enrolled_at,
                 withdrawn_at, created_at, updated_at, deleted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.student_id)
        .bind(&row.module_id)
        .bind(&row.status)
        .bind(&row.kind)
        .bind(&row.batch_id)
        .bind(row.enrolled_at)
        .bind(row.withdrawn_at)
        .bind(row.created_at)
        .bind(row.updated_at)
        .bind(row.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>, DbError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM enrollments WHERE id = ?");
        let row: Option<EnrollmentRow> = sqlx::query_as(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    pub async fn find_live_by_student_and_module(
        &self,
        student_id: Uuid,
        module_id: Uuid,
    ) -> Result<Option<Enrollment>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM enrollments \
             WHERE student_id = ? AND module_id = ? AND deleted_at IS NULL"
        );
        let row: Option<EnrollmentRow> = sqlx::query_as(&query)
            .bind(student_id.to_string())
            .bind(module_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    /// Every enrollment a batch created, in insertion order. Used by the
    /// audit/history endpoint.
    pub async fn find_by_batch(&self, batch_id: Uuid) -> Result<Vec<Enrollment>, DbError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM enrollments WHERE batch_id = ? ORDER BY rowid ASC"
        );
        let rows: Vec<EnrollmentRow> = sqlx::query_as(&query)
            .bind(batch_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Persist a status transition already applied to the domain value.
    pub async fn update_status(&self, enrollment: &Enrollment) -> Result<(), DbError> {
        let row = EnrollmentRow::from(enrollment);

        sqlx::query(
            "UPDATE enrollments SET status = ?, withdrawn_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&row.status)
        .bind(row.withdrawn_at)
        .bind(row.updated_at)
        .bind(&row.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
