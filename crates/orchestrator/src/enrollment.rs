use campus_core::{BatchOptions, BatchReport, Enrollment, EnrollmentKind, EnrollmentSubject};
use db::TenantStorageHandle;
use events::{Notification, NotificationBus, NotificationEnvelope};
use tracing::debug;
use uuid::Uuid;

use crate::batch::{run_batch, ItemVerdict};
use crate::error::{OrchestratorError, Result};

/// Batched enrollment writes against one tenant's storage.
///
/// Both call shapes (one student into many modules, many students at
/// once) run through the same per-item path; the wide shape is the
/// narrow one repeated under a shared batch id with counts summed.
pub struct EnrollmentService {
    handle: TenantStorageHandle,
    bus: NotificationBus,
}

impl EnrollmentService {
    pub fn new(handle: TenantStorageHandle, bus: NotificationBus) -> Self {
        Self { handle, bus }
    }

    /// Enroll one student in each of the given modules.
    pub async fn enroll_student(
        &self,
        student_id: Uuid,
        module_ids: Vec<Uuid>,
        kind: EnrollmentKind,
        options: BatchOptions,
    ) -> Result<BatchReport<EnrollmentSubject>> {
        let batch_id = Uuid::new_v4();
        self.enroll_into_batch(batch_id, student_id, module_ids, kind, options)
            .await
    }

    /// Enroll many students in the same set of modules under one batch.
    pub async fn enroll_students(
        &self,
        student_ids: Vec<Uuid>,
        module_ids: Vec<Uuid>,
        kind: EnrollmentKind,
        options: BatchOptions,
    ) -> Result<BatchReport<EnrollmentSubject>> {
        if student_ids.is_empty() {
            return Err(OrchestratorError::EmptyBatch);
        }

        let batch_id = Uuid::new_v4();
        let mut combined = BatchReport::new(batch_id);
        for student_id in student_ids {
            let report = self
                .enroll_into_batch(batch_id, student_id, module_ids.clone(), kind, options)
                .await?;
            combined.absorb(report);
        }

        Ok(combined)
    }

    async fn enroll_into_batch(
        &self,
        batch_id: Uuid,
        student_id: Uuid,
        module_ids: Vec<Uuid>,
        kind: EnrollmentKind,
        options: BatchOptions,
    ) -> Result<BatchReport<EnrollmentSubject>> {
        // Looked up once; a missing student fails every item, not the batch.
        let student_exists = self
            .handle
            .students()
            .find_live(student_id)
            .await?
            .is_some();

        let enrollments = self.handle.enrollments();
        let modules = self.handle.modules();
        let bus = self.bus.clone();
        let tenant_id = self.handle.context().tenant_id;

        run_batch(
            batch_id,
            module_ids,
            |module_id| EnrollmentSubject {
                student_id,
                module_id: *module_id,
            },
            |module_id| {
                let enrollments = enrollments.clone();
                let modules = modules.clone();
                let bus = bus.clone();
                async move {
                    if !student_exists {
                        return Ok(ItemVerdict::Rejected {
                            reason: "student not found".into(),
                        });
                    }

                    let Some(module) = modules.find_live(module_id).await? else {
                        return Ok(ItemVerdict::Rejected {
                            reason: "module not found".into(),
                        });
                    };
                    if !module.published {
                        return Ok(ItemVerdict::Rejected {
                            reason: "module not published".into(),
                        });
                    }

                    if let Some(existing) = enrollments
                        .find_live_by_student_and_module(student_id, module_id)
                        .await?
                    {
                        return Ok(ItemVerdict::Duplicate {
                            record_id: Some(existing.id),
                        });
                    }

                    let enrollment = Enrollment::new(student_id, module_id, kind, batch_id);
                    match enrollments.insert(&enrollment).await {
                        Ok(()) => {
                            if options.notify {
                                let sent = bus.publish(NotificationEnvelope::new(
                                    tenant_id,
                                    Notification::EnrollmentCreated {
                                        enrollment_id: enrollment.id,
                                        student_id,
                                        module_id,
                                        batch_id,
                                    },
                                ));
                                if sent == 0 {
                                    debug!(%enrollment.id, "enrollment notification dropped");
                                }
                            }
                            Ok(ItemVerdict::Created {
                                record_id: enrollment.id,
                            })
                        }
                        // A concurrent writer beat us to the insert; the
                        // unique index is the authoritative duplicate signal.
                        Err(err) if err.is_unique_violation() => {
                            let existing = enrollments
                                .find_live_by_student_and_module(student_id, module_id)
                                .await?;
                            Ok(ItemVerdict::Duplicate {
                                record_id: existing.map(|e| e.id),
                            })
                        }
                        Err(err) => Err(err.into()),
                    }
                }
            },
        )
        .await
    }

    /// ACTIVE → WITHDRAWN. Terminal states reject.
    pub async fn withdraw(&self, enrollment_id: Uuid) -> Result<Enrollment> {
        let repo = self.handle.enrollments();
        let mut enrollment = repo
            .find_by_id(enrollment_id)
            .await?
            .ok_or(OrchestratorError::NotFound("enrollment"))?;

        enrollment.withdraw()?;
        repo.update_status(&enrollment).await?;

        let sent = self.bus.publish(NotificationEnvelope::new(
            self.handle.context().tenant_id,
            Notification::EnrollmentWithdrawn {
                enrollment_id: enrollment.id,
                student_id: enrollment.student_id,
                module_id: enrollment.module_id,
            },
        ));
        if sent == 0 {
            debug!(%enrollment.id, "withdrawal notification dropped");
        }

        Ok(enrollment)
    }

    /// ACTIVE → COMPLETED. Terminal states reject.
    pub async fn complete(&self, enrollment_id: Uuid) -> Result<Enrollment> {
        let repo = self.handle.enrollments();
        let mut enrollment = repo
            .find_by_id(enrollment_id)
            .await?
            .ok_or(OrchestratorError::NotFound("enrollment"))?;

        enrollment.complete()?;
        repo.update_status(&enrollment).await?;

        Ok(enrollment)
    }

    /// Audit view: everything one batch created.
    pub async fn find_by_batch(&self, batch_id: Uuid) -> Result<Vec<Enrollment>> {
        Ok(self.handle.enrollments().find_by_batch(batch_id).await?)
    }
}
