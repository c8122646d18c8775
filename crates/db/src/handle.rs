use campus_core::TenantContext;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbError;
use crate::repositories::{
    BibliographyRepository, ChapterRepository, ChatMessageRepository, ChatSessionRepository,
    EnrollmentRepository, ModuleRepository, StudentRepository,
};

/// Scoped access to one tenant's logical database: typed repository
/// accessors plus the transaction primitive. Handles are cheap clones of
/// a pooled connection; all state lives in the pool.
#[derive(Clone, Debug)]
pub struct TenantStorageHandle {
    context: TenantContext,
    pool: SqlitePool,
}

impl TenantStorageHandle {
    pub fn new(context: TenantContext, pool: SqlitePool) -> Self {
        Self { context, pool }
    }

    pub fn context(&self) -> &TenantContext {
        &self.context
    }

    /// Open the atomic unit for a multi-write workflow. Writes inside the
    /// transaction commit together on an explicit commit; dropping the
    /// transaction rolls everything back. Transactions do not nest: an
    /// engine owns one transaction for its whole scope.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DbError> {
        Ok(self.pool.begin().await?)
    }

    pub fn students(&self) -> StudentRepository {
        StudentRepository::new(self.pool.clone())
    }

    pub fn modules(&self) -> ModuleRepository {
        ModuleRepository::new(self.pool.clone())
    }

    pub fn chapters(&self) -> ChapterRepository {
        ChapterRepository::new(self.pool.clone())
    }

    pub fn bibliography(&self) -> BibliographyRepository {
        BibliographyRepository::new(self.pool.clone())
    }

    pub fn enrollments(&self) -> EnrollmentRepository {
        EnrollmentRepository::new(self.pool.clone())
    }

    pub fn chat_sessions(&self) -> ChatSessionRepository {
        ChatSessionRepository::new(self.pool.clone())
    }

    pub fn chat_messages(&self) -> ChatMessageRepository {
        ChatMessageRepository::new(self.pool.clone())
    }
}
