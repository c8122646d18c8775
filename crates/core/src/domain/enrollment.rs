use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Withdrawn,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentKind {
    #[default]
    Individual,
    AcademicYear,
}

impl EnrollmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::AcademicYear => "academic_year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(Self::Individual),
            "academic_year" => Some(Self::AcademicYear),
            _ => None,
        }
    }
}

/// The pair of identifiers one batch item operates on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct EnrollmentSubject {
    pub student_id: Uuid,
    pub module_id: Uuid,
}

/// A student's membership in a module. At most one live enrollment may
/// exist per (student, module) pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub module_id: Uuid,
    pub status: EnrollmentStatus,
    pub kind: EnrollmentKind,
    /// Batch that created this record, kept for audit queries.
    pub batch_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub withdrawn_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn new(student_id: Uuid, module_id: Uuid, kind: EnrollmentKind, batch_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            student_id,
            module_id,
            status: EnrollmentStatus::default(),
            kind,
            batch_id,
            enrolled_at: now,
            withdrawn_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn complete(&mut self) -> Result<(), CoreError> {
        self.transition_to(EnrollmentStatus::Completed)?;
        Ok(())
    }

    pub fn withdraw(&mut self) -> Result<(), CoreError> {
        self.transition_to(EnrollmentStatus::Withdrawn)?;
        self.withdrawn_at = Some(Utc::now());
        Ok(())
    }

    fn transition_to(&mut self, to: EnrollmentStatus) -> Result<(), CoreError> {
        if self.status != EnrollmentStatus::Active {
            return Err(CoreError::invalid_transition(
                "enrollment",
                self.status.as_str(),
                to.as_str(),
            ));
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
