use campus_core::{Enrollment, EnrollmentKind, EnrollmentStatus};
use uuid::Uuid;

use super::{datetime_to_timestamp, timestamp_to_datetime};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrollmentRow {
    pub id: String,
    pub student_id: String,
    pub module_id: String,
    pub status: String,
    pub kind: String,
    pub batch_id: String,
    pub enrolled_at: i64,
    pub withdrawn_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl EnrollmentRow {
    pub fn into_domain(self) -> Enrollment {
        Enrollment {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            student_id: Uuid::parse_str(&self.student_id).unwrap_or_default(),
            module_id: Uuid::parse_str(&self.module_id).unwrap_or_default(),
            status: EnrollmentStatus::parse(&self.status).unwrap_or_default(),
            kind: EnrollmentKind::parse(&self.kind).unwrap_or_default(),
            batch_id: Uuid::parse_str(&self.batch_id).unwrap_or_default(),
            enrolled_at: timestamp_to_datetime(self.enrolled_at),
            withdrawn_at: self.withdrawn_at.map(timestamp_to_datetime),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
            deleted_at: self.deleted_at.map(timestamp_to_datetime),
        }
    }
}

impl From<&Enrollment> for EnrollmentRow {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id.to_string(),
            student_id: enrollment.student_id.to_string(),
            module_id: enrollment.module_id.to_string(),
            status: enrollment.status.as_str().to_string(),
            kind: enrollment.kind.as_str().to_string(),
            batch_id: enrollment.batch_id.to_string(),
            enrolled_at: datetime_to_timestamp(enrollment.enrolled_at),
            withdrawn_at: enrollment.withdrawn_at.map(datetime_to_timestamp),
            created_at: datetime_to_timestamp(enrollment.created_at),
            updated_at: datetime_to_timestamp(enrollment.updated_at),
            deleted_at: enrollment.deleted_at.map(datetime_to_timestamp),
        }
    }
}
